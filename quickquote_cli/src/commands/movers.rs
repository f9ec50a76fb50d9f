use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use quickquote_lib::QuoteService;

use crate::output::{print_snapshot, OutputFormat};

#[derive(Args)]
pub struct MoversArgs {
    /// Re-poll every N seconds until interrupted
    #[arg(long, value_name = "SECS")]
    pub watch: Option<u64>,
}

pub async fn run(args: &MoversArgs, service: &QuoteService, format: &OutputFormat) -> Result<()> {
    let Some(secs) = args.watch else {
        let snapshot = service.request_snapshot().await?;
        return print_snapshot(&snapshot, format);
    };
    if secs == 0 {
        bail!("--watch interval must be at least 1 second");
    }

    let interval = Duration::from_secs(secs);
    loop {
        match service.request_snapshot().await {
            Ok(snapshot) => print_snapshot(&snapshot, format)?,
            Err(e) => eprintln!("Snapshot failed: {}", e),
        }
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}
