mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quickquote_lib::{QuoteService, Settings};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "quickquote")]
#[command(about = "US stock quotes and top movers from the Stooq feed")]
struct Cli {
    /// Output format: table, markdown, csv, or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Feed base URL (overrides QUICKQUOTE_FEED_URL)
    #[arg(long, global = true)]
    feed_url: Option<String>,

    /// Concurrent fetches per universe (overrides QUICKQUOTE_CONCURRENCY)
    #[arg(long, global = true)]
    concurrency: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the current quote for a symbol
    Quote(commands::quote::QuoteArgs),
    /// Show top gainers and losers for stocks and REITs
    Movers(commands::movers::MoversArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quickquote=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = OutputFormat::parse(&cli.output);

    let mut settings = Settings::from_env();
    if let Some(url) = cli.feed_url {
        settings.feed_url = url;
    }
    if let Some(concurrency) = cli.concurrency {
        settings.concurrency = concurrency;
    }
    let service = QuoteService::from_settings(&settings)?;

    match &cli.command {
        Commands::Quote(args) => commands::quote::run(args, &service, &format).await?,
        Commands::Movers(args) => commands::movers::run(args, &service, &format).await?,
    }

    Ok(())
}
