use clap::Parser;
use quote_history::{
    CalendarDay, QuoteHistory,
    cli::{
        commands::{Cli, Commands},
        params::PerformanceReport,
    },
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    // Logs go to stderr so stdout stays machine-readable JSON.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let history = QuoteHistory::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Price { symbol, date } => {
            let price = history.price_of(&symbol, date).await?;
            println!("{}", serde_json::to_string_pretty(&price)?);
        }

        Commands::Quotes { symbol, from, to } => {
            let series = history.fetch_quotes(&symbol, from, to).await?;
            println!("{}", serde_json::to_string_pretty(&series.to_table())?);
        }

        Commands::Performances { symbol } => {
            let ratios = history.performances(&symbol).await?;
            let report = PerformanceReport::new(&symbol, CalendarDay::today(), &ratios);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
