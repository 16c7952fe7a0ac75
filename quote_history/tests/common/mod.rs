#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quote_history::{
    CalendarDay, ChartRequest, RawQuoteResponse,
    providers::{ProviderError, QuoteSource, StatusSnafu},
};

/// 14:30 UTC, a typical regular-session timestamp.
pub const SESSION_OPEN_SECS: i64 = 52_200;

pub fn day(y: i32, m: u32, d: u32) -> CalendarDay {
    CalendarDay::from_ymd(y, m, d).unwrap()
}

enum Reply {
    Chart(RawQuoteResponse),
    Status(u16),
}

/// In-memory [`QuoteSource`] that records every request it receives.
///
/// Clones share the same log, so a test can keep one handle while the
/// other is moved into a `QuoteHistory`.
#[derive(Clone)]
pub struct RecordingSource {
    reply: Arc<Reply>,
    requests: Arc<Mutex<Vec<ChartRequest>>>,
}

impl RecordingSource {
    pub fn replying(raw: RawQuoteResponse) -> Self {
        Self {
            reply: Arc::new(Reply::Chart(raw)),
            requests: Arc::default(),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            reply: Arc::new(Reply::Status(status)),
            requests: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ChartRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteSource for RecordingSource {
    async fn fetch_chart(&self, request: &ChartRequest) -> Result<RawQuoteResponse, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.reply.as_ref() {
            Reply::Chart(raw) => Ok(raw.clone()),
            Reply::Status(status) => StatusSnafu {
                status: *status,
                message: "Service Unavailable".to_string(),
            }
            .fail(),
        }
    }
}

/// A payload with one bar per listed day, stamped at the session open.
pub fn chart_of(days: &[(CalendarDay, f64)]) -> RawQuoteResponse {
    RawQuoteResponse::from_parallel(
        days.iter().map(|(d, _)| Some(d.timestamp() + SESSION_OPEN_SECS)).collect(),
        days.iter().map(|(_, c)| Some(*c)).collect(),
    )
}

/// `n` consecutive calendar days ending on `last`, closing at 100, 101, ...
pub fn linear_days(last: CalendarDay, n: u32) -> Vec<(CalendarDay, f64)> {
    (0..n)
        .map(|i| (last.days_back(n - 1 - i), 100.0 + i as f64))
        .collect()
}
