use tracing::debug;

use crate::{
    errors::{Error, Result},
    models::{
        calendar_day::CalendarDay,
        quote_series::{DayClose, QuoteSeries},
    },
    providers::RawQuoteResponse,
};

/// Turns a chart payload into an ascending daily close series.
///
/// Reads `timestamp` and `close` from the first result and its first quote
/// indicator. Pairs where either side is `null` are skipped. Each timestamp is
/// normalized to its UTC day; when two consecutive bars land on the same day
/// the later one is kept (the provider appends an intraday bar for the
/// running session).
///
/// Same-day duplicates therefore collapse: timestamps `[1, 2, 3]` with closes
/// `[10, null, 30]` all fall on 1970-01-01 and yield one entry, `30`.
///
/// # Errors
///
/// [`Error::MalformedResponse`] when the payload lacks the nested structure,
/// the arrays differ in length, exactly one of the arrays is missing, a close
/// is not finite, a timestamp is out of range, or days go backwards. A result
/// with neither array is the provider's encoding of an empty range and yields
/// an empty series.
pub fn build(raw: &RawQuoteResponse) -> Result<QuoteSeries> {
    let chart = raw
        .chart
        .as_ref()
        .ok_or_else(|| Error::malformed("missing `chart`"))?;
    let result = chart
        .result
        .as_deref()
        .and_then(<[_]>::first)
        .ok_or_else(|| Error::malformed("`chart.result` is missing or empty"))?;
    let quote = result
        .indicators
        .as_ref()
        .and_then(|i| i.quote.as_deref())
        .and_then(<[_]>::first)
        .ok_or_else(|| Error::malformed("`indicators.quote` is missing or empty"))?;

    let (timestamps, closes) = match (result.timestamp.as_deref(), quote.close.as_deref()) {
        (Some(timestamps), Some(closes)) => (timestamps, closes),
        (None, None) => {
            debug!("chart has no data points in range");
            return Ok(QuoteSeries::default());
        }
        (None, Some(_)) => return Err(Error::malformed("`close` present without `timestamp`")),
        (Some(_), None) => return Err(Error::malformed("`timestamp` present without `close`")),
    };

    if timestamps.len() != closes.len() {
        return Err(Error::malformed(format!(
            "{} timestamps but {} close prices",
            timestamps.len(),
            closes.len()
        )));
    }

    let mut entries: Vec<DayClose> = Vec::with_capacity(timestamps.len());
    let mut skipped = 0usize;
    let mut collapsed = 0usize;

    for (index, pair) in timestamps.iter().zip(closes).enumerate() {
        let (Some(ts), Some(close)) = (*pair.0, *pair.1) else {
            skipped += 1;
            continue;
        };
        if !close.is_finite() {
            return Err(Error::malformed(format!("non-finite close at index {index}")));
        }
        let day = CalendarDay::from_timestamp(ts)
            .ok_or_else(|| Error::malformed(format!("timestamp {ts} at index {index} is out of range")))?;

        match entries.last_mut() {
            Some(prev) if prev.day == day => {
                *prev = DayClose::new(day, close);
                collapsed += 1;
            }
            Some(prev) if prev.day > day => {
                return Err(Error::malformed(format!(
                    "day {day} at index {index} comes after {}",
                    prev.day
                )));
            }
            _ => entries.push(DayClose::new(day, close)),
        }
    }

    debug!(
        kept = entries.len(),
        skipped, collapsed, "built daily close series"
    );
    Ok(QuoteSeries::from_checked(entries))
}
