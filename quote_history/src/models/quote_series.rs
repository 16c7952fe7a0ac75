//! Canonical in-memory representation of a daily close series.
//!
//! A [`QuoteSeries`] is what the builder produces from a provider response and
//! what the lookup engine and the performance calculator consume. It is
//! immutable once built: entries are only exposed as a slice.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    errors::{Error, Result},
    models::calendar_day::{CalendarDay, DateLike},
    series::lookup,
};

/// The closing price of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayClose {
    /// The trading day (UTC midnight).
    pub day: CalendarDay,

    /// Closing price for that day, in the instrument's quote currency.
    pub close: f64,
}

impl DayClose {
    pub fn new(day: CalendarDay, close: f64) -> Self {
        Self { day, close }
    }
}

/// An ascending sequence of [`DayClose`] with strictly increasing days and
/// finite closes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuoteSeries {
    entries: Vec<DayClose>,
}

impl QuoteSeries {
    /// Validates and wraps caller-provided entries.
    ///
    /// Fails with [`Error::MalformedResponse`] when a close is not finite or
    /// days are not strictly increasing.
    pub fn try_from_entries(entries: Vec<DayClose>) -> Result<Self> {
        if let Some(bad) = entries.iter().find(|e| !e.close.is_finite()) {
            return Err(Error::malformed(format!(
                "non-finite close {} on {}",
                bad.close, bad.day
            )));
        }
        if let Some(pair) = entries.windows(2).find(|w| w[0].day >= w[1].day) {
            return Err(Error::malformed(format!(
                "days not strictly increasing: {} then {}",
                pair[0].day, pair[1].day
            )));
        }
        Ok(Self { entries })
    }

    /// Wraps entries the caller has already checked.
    pub(crate) fn from_checked(entries: Vec<DayClose>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DayClose] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DayClose> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&DayClose> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&DayClose> {
        self.entries.last()
    }

    /// Close of the most recent day in the series.
    pub fn last_close(&self) -> Option<f64> {
        self.last().map(|e| e.close)
    }

    /// See [`lookup::close_at`].
    pub fn close_at<D: DateLike>(&self, target: D) -> Option<f64> {
        lookup::close_at(self, target)
    }

    /// See [`lookup::close_before`].
    pub fn close_before<D: DateLike>(&self, target: D) -> Option<f64> {
        lookup::close_before(self, target)
    }

    /// The last entry on or before `target`'s day.
    pub fn entry_at<D: DateLike>(&self, target: D) -> Option<&DayClose> {
        lookup::entry_at(self, target)
    }

    /// The last entry strictly before `target`'s day.
    pub fn entry_before<D: DateLike>(&self, target: D) -> Option<&DayClose> {
        lookup::entry_before(self, target)
    }

    /// Tabular form with a header row: `[["Date","Close"],["2024-01-02",185.6],...]`.
    pub fn to_table(&self) -> Value {
        let mut rows = Vec::with_capacity(self.entries.len() + 1);
        rows.push(json!(["Date", "Close"]));
        rows.extend(
            self.entries
                .iter()
                .map(|e| json!([e.day.to_string(), e.close])),
        );
        Value::Array(rows)
    }
}

impl<'a> IntoIterator for &'a QuoteSeries {
    type Item = &'a DayClose;
    type IntoIter = std::slice::Iter<'a, DayClose>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
