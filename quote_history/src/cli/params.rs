use serde::Serialize;

use crate::{
    models::calendar_day::CalendarDay,
    performance::{HorizonPerformance, labeled},
};

/// clap value parser for `YYYY-MM-DD` arguments.
pub fn parse_day(s: &str) -> Result<CalendarDay, String> {
    s.parse()
        .map_err(|e| format!("expected a date like 2024-12-31, got {s:?} ({e})"))
}

/// JSON body printed by the `performances` subcommand.
#[derive(Debug, Serialize)]
pub struct PerformanceReport {
    pub symbol: String,
    pub as_of: CalendarDay,
    pub performances: Vec<HorizonPerformance>,
}

impl PerformanceReport {
    pub fn new(symbol: &str, as_of: CalendarDay, ratios: &[Option<f64>]) -> Self {
        Self {
            symbol: symbol.trim().to_string(),
            as_of,
            performances: labeled(ratios),
        }
    }
}
