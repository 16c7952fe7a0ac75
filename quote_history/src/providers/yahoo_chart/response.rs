//! Wire shape of the v8 chart endpoint.
//!
//! Every level is optional so that a syntactically valid body always
//! decodes; whether it has the structure of a usable chart is decided by the
//! series builder, which reports gaps as malformed responses instead of
//! decode failures.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RawQuoteResponse {
    pub chart: Option<Chart>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ChartResult {
    /// Bar open times, seconds since the epoch. Parallel to `close`.
    pub timestamp: Option<Vec<Option<i64>>>,
    pub indicators: Option<Indicators>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Indicators {
    pub quote: Option<Vec<QuoteIndicator>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct QuoteIndicator {
    /// `null` on days the provider has no close for.
    pub close: Option<Vec<Option<f64>>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct ChartError {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl RawQuoteResponse {
    /// A single-result payload from parallel arrays.
    pub fn from_parallel(timestamps: Vec<Option<i64>>, closes: Vec<Option<f64>>) -> Self {
        Self {
            chart: Some(Chart {
                result: Some(vec![ChartResult {
                    timestamp: Some(timestamps),
                    indicators: Some(Indicators {
                        quote: Some(vec![QuoteIndicator {
                            close: Some(closes),
                        }]),
                    }),
                }]),
                error: None,
            }),
        }
    }

    /// The provider's error object, if the payload carries one.
    pub fn error(&self) -> Option<&ChartError> {
        self.chart.as_ref().and_then(|c| c.error.as_ref())
    }
}
