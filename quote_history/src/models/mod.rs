pub mod calendar_day;
pub mod quote_series;
pub mod request_params;
