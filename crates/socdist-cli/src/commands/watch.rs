//! Watch command implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use socdist_session::SessionConfig;

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Seconds between expiry checks
    #[arg(long, default_value_t = 60)]
    pub interval: u64,
}

pub async fn run(global: &GlobalArgs, args: WatchArgs) -> Result<()> {
    let config = SessionConfig {
        refresh_interval: Duration::from_secs(args.interval.max(1)),
        ..SessionConfig::default()
    };
    let ctx = context::open(global, config)?;
    context::require_session(&ctx)?;

    ctx.store.start_refresh_timer();

    eprintln!("{}", "Keeping the session fresh.".dimmed());
    eprintln!("{}", "Press Ctrl+C to stop.".dimmed());

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    let still_authenticated = ctx.store.authenticated();
    ctx.teardown();

    if still_authenticated {
        output::success("Stopped; session kept");
        Ok(())
    } else {
        anyhow::bail!("Session ended while watching")
    }
}
