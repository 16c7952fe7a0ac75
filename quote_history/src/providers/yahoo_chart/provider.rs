use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client, StatusCode, Url, header};
use snafu::ResultExt;
use tracing::{debug, info};

use crate::{
    config::Config,
    models::request_params::ChartRequest,
    providers::{
        ApiSnafu, ClientBuildSnafu, DecodeSnafu, InvalidBaseUrlSnafu, ProviderError,
        ProviderInitError, QuoteSource, StatusSnafu, TransportSnafu,
        yahoo_chart::{
            params::{Locale, build_url},
            response::RawQuoteResponse,
        },
    },
};

/// Daily closes from the Yahoo Finance v8 chart endpoint.
pub struct YahooChartProvider {
    client: Client,
    base_url: Url,
    locale: Locale,
    limiter: DefaultDirectRateLimiter,
}

impl YahooChartProvider {
    /// Creates a provider with the default configuration.
    pub fn new() -> Result<Self, ProviderInitError> {
        Self::with_config(&Config::default())
    }

    /// Creates a provider from `config`.
    ///
    /// Fails when the base URL cannot take a symbol path segment or the HTTP
    /// client cannot be built.
    pub fn with_config(config: &Config) -> Result<Self, ProviderInitError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            InvalidBaseUrlSnafu {
                url: config.base_url.clone(),
                message: e.to_string(),
            }
            .build()
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return InvalidBaseUrlSnafu {
                url: config.base_url.clone(),
                message: "expected an absolute http(s) URL",
            }
            .fail();
        }

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url,
            locale: Locale {
                lang: config.lang.clone(),
                region: config.region.clone(),
            },
            limiter: RateLimiter::direct(Quota::per_second(config.requests_per_second)),
        })
    }

    /// The exact URL [`fetch_chart`](QuoteSource::fetch_chart) will request.
    pub fn chart_url(&self, request: &ChartRequest) -> Url {
        build_url(&self.base_url, request, &self.locale)
    }
}

#[async_trait]
impl QuoteSource for YahooChartProvider {
    async fn fetch_chart(&self, request: &ChartRequest) -> Result<RawQuoteResponse, ProviderError> {
        let url = self.chart_url(request);

        self.limiter.until_ready().await;
        info!(%url, symbol = request.symbol(), "requesting daily chart");

        let response = self.client.get(url).send().await.context(TransportSnafu)?;
        let status = response.status();
        let body = response.text().await.context(TransportSnafu)?;
        debug!(status = status.as_u16(), bytes = body.len(), "chart response received");

        if !status.is_success() {
            return StatusSnafu {
                status: status.as_u16(),
                message: describe_failure(status, &body),
            }
            .fail();
        }

        let raw: RawQuoteResponse = serde_json::from_str(&body).context(DecodeSnafu)?;

        if let Some(error) = raw.error() {
            return ApiSnafu {
                code: error.code.clone().unwrap_or_else(|| "unknown".to_string()),
                description: error.description.clone().unwrap_or_default(),
            }
            .fail();
        }

        Ok(raw)
    }
}

/// Prefers the provider's own error description over the raw body.
fn describe_failure(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<RawQuoteResponse>(body)
        .ok()
        .and_then(|raw| raw.error().and_then(|e| e.description.clone()))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown API error")
                    .to_string()
            } else {
                trimmed.to_string()
            }
        })
}
