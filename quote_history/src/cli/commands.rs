use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{cli::params::parse_day, models::calendar_day::CalendarDay};

#[derive(Parser)]
#[command(author, version, about = "Daily closes and trailing performance from the Yahoo chart API")]
pub struct Cli {
    /// Path to an optional TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Close as of a day (last close on or before it)
    Price {
        /// Provider symbol (e.g. "AAPL", "^GSPC", "VOD.L")
        symbol: String,

        /// Day in YYYY-MM-DD form; defaults to today (UTC)
        #[arg(long, value_parser = parse_day)]
        date: Option<CalendarDay>,
    },

    /// Daily close series as a [["Date","Close"], ...] table
    Quotes {
        symbol: String,

        /// First day, YYYY-MM-DD; defaults to 61 months ago
        #[arg(long, value_parser = parse_day)]
        from: Option<CalendarDay>,

        /// Last day, YYYY-MM-DD; requires --from, defaults to today
        #[arg(long, value_parser = parse_day, requires = "from")]
        to: Option<CalendarDay>,
    },

    /// Trailing performance over 5D, 1M, 3M, 6M, YTD, 1Y, 2Y, 3Y and 5Y
    Performances { symbol: String },
}
