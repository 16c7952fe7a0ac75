//! From provider payload to answers: [`builder`] turns a
//! [`RawQuoteResponse`](crate::providers::RawQuoteResponse) into a
//! [`QuoteSeries`](crate::models::quote_series::QuoteSeries), and [`lookup`]
//! answers point-in-time questions about it.

pub mod builder;
pub mod lookup;

pub use builder::build;
pub use lookup::{close_at, close_before};
