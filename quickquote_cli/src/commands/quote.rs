use anyhow::Result;
use clap::Args;
use quickquote_lib::{normalize_symbol, QuoteService};

use crate::output::{print_quote, OutputFormat};

#[derive(Args)]
pub struct QuoteArgs {
    /// Ticker symbol (e.g. AAPL, brk.b)
    pub symbol: String,
}

pub async fn run(args: &QuoteArgs, service: &QuoteService, format: &OutputFormat) -> Result<()> {
    let symbol = normalize_symbol(&args.symbol);
    let quote = service.request_quote(&symbol).await?;
    print_quote(&quote, format)
}
