use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    errors::{Error, Result},
    models::calendar_day::{CalendarDay, normalize},
};

/// Parameters for one daily-close chart request.
///
/// Construction validates the arguments, so a `ChartRequest` that exists is
/// always safe to send: the symbol is non-blank and `from <= to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChartRequest {
    symbol: String,

    /// First day of the range (inclusive).
    from: CalendarDay,

    /// Last day of the range (inclusive).
    to: CalendarDay,
}

impl ChartRequest {
    /// How far back the default range reaches: five years plus a month of
    /// slack so the oldest performance horizon always has a baseline.
    pub const DEFAULT_LOOKBACK_MONTHS: u32 = 61;

    /// Builds a request relative to the current time.
    ///
    /// * both bounds omitted: the last [`DEFAULT_LOOKBACK_MONTHS`](Self::DEFAULT_LOOKBACK_MONTHS) up to today;
    /// * only `from`: from that day up to today;
    /// * only `to`: rejected, a range end needs a start;
    /// * `from > to`: rejected;
    /// * `to` on chrono's last day: rejected, the exclusive end would overflow.
    pub fn new(symbol: &str, from: Option<CalendarDay>, to: Option<CalendarDay>) -> Result<Self> {
        Self::new_at(symbol, from, to, Utc::now())
    }

    /// Same as [`new`](Self::new) with an explicit clock.
    pub fn new_at(
        symbol: &str,
        from: Option<CalendarDay>,
        to: Option<CalendarDay>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let symbol = validate_symbol(symbol)?;
        let today = normalize(now);

        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            (Some(from), None) => (from, today),
            (None, None) => (today.months_back(Self::DEFAULT_LOOKBACK_MONTHS), today),
            (None, Some(to)) => {
                return Err(Error::invalid(format!(
                    "range end {to} given without a range start"
                )));
            }
        };

        if from > to {
            return Err(Error::invalid(format!(
                "range start {from} is after range end {to}"
            )));
        }
        if to.checked_succ().is_none() {
            return Err(Error::invalid(format!(
                "range end {to} is the last representable day"
            )));
        }

        Ok(Self {
            symbol: symbol.to_string(),
            from,
            to,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn from(&self) -> CalendarDay {
        self.from
    }

    pub fn to(&self) -> CalendarDay {
        self.to
    }

    /// Range start as epoch seconds (midnight UTC of `from`).
    pub fn period1(&self) -> i64 {
        self.from.timestamp()
    }

    /// Range end as epoch seconds: midnight UTC of the day after `to`, so the
    /// whole of `to` is covered.
    pub fn period2(&self) -> i64 {
        self.to.succ().timestamp()
    }
}

/// Trims the symbol and rejects blank ones.
pub(crate) fn validate_symbol(symbol: &str) -> Result<&str> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid("symbol must not be empty"));
    }
    Ok(trimmed)
}
