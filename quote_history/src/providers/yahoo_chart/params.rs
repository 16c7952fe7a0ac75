use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::models::request_params::ChartRequest;

/// Corporate events the chart endpoint is asked to annotate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartEvent {
    CapitalGain,
    #[serde(rename = "div")]
    Dividend,
    Split,
}

impl ChartEvent {
    pub const ALL: [ChartEvent; 3] = [ChartEvent::CapitalGain, ChartEvent::Dividend, ChartEvent::Split];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartEvent::CapitalGain => "capitalGain",
            ChartEvent::Dividend => "div",
            ChartEvent::Split => "split",
        }
    }
}

/// Bar width. Only daily bars are requested today.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    #[default]
    #[serde(rename = "1d")]
    Daily,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
        }
    }
}

/// Locale parameters appended to every request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Locale {
    pub lang: String,
    pub region: String,
}

/// Builds the query string pairs, in the order the endpoint documents them.
pub fn construct_params(request: &ChartRequest, locale: &Locale) -> Vec<(&'static str, String)> {
    let events = ChartEvent::ALL
        .iter()
        .map(ChartEvent::as_str)
        .collect::<Vec<_>>()
        .join("|");

    vec![
        ("events", events),
        ("formatted", "true".to_string()),
        ("includeAdjustedClose", "true".to_string()),
        ("interval", Interval::Daily.as_str().to_string()),
        ("period1", request.period1().to_string()),
        ("period2", request.period2().to_string()),
        ("symbol", request.symbol().to_string()),
        ("userYfid", "true".to_string()),
        ("lang", locale.lang.clone()),
        ("region", locale.region.clone()),
    ]
}

/// Characters left as-is when encoding a URL component; the same set
/// JavaScript's `encodeURIComponent` keeps.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// `{base}/{symbol}?{params}` with the symbol and every query value
/// component-encoded (`^GSPC` becomes `%5EGSPC`, a space becomes `%20`).
pub fn build_url(base: &Url, request: &ChartRequest, locale: &Locale) -> Url {
    let mut url = base.clone();
    // Bases are checked to be hierarchical when the provider is built.
    let path = format!(
        "{}/{}",
        base.path().trim_end_matches('/'),
        encode_component(request.symbol())
    );
    url.set_path(&path);

    let query = construct_params(request, locale)
        .into_iter()
        .map(|(key, value)| format!("{key}={}", encode_component(&value)))
        .collect::<Vec<_>>()
        .join("&");
    url.set_query(Some(&query));
    url
}
