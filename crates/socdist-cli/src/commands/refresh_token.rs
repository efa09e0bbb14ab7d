//! Refresh token command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use socdist_session::{RefreshOutcome, SessionConfig};

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct RefreshTokenArgs {}

pub async fn run(global: &GlobalArgs, _args: RefreshTokenArgs) -> Result<()> {
    let ctx = context::open(global, SessionConfig::default())?;
    context::require_session(&ctx)?;

    eprintln!("{}", "Refreshing access token...".dimmed());

    match ctx.store.refresh_token().await {
        RefreshOutcome::Refreshed => {
            output::success("Access token refreshed");
            if let Some(access) = ctx.store.access_token() {
                output::expiry(&access);
            }
            Ok(())
        }
        RefreshOutcome::LoggedOut => {
            anyhow::bail!("Refresh was rejected and the session has been ended")
        }
        RefreshOutcome::Superseded => {
            anyhow::bail!("Session changed while refreshing; nothing was updated")
        }
    }
}
