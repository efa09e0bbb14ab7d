//! Whoami command implementation.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use socdist_core::claims;
use socdist_session::SessionConfig;

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SessionSummary<'a> {
    api_url: &'a str,
    authenticated: bool,
    access_expires_at: Option<DateTime<Utc>>,
    almost_expired: bool,
}

pub fn run(global: &GlobalArgs, args: WhoamiArgs) -> Result<()> {
    let ctx = context::open(global, SessionConfig::default())?;
    context::require_session(&ctx)?;

    let access = ctx.store.access_token();
    let summary = SessionSummary {
        api_url: &global.api_url,
        authenticated: ctx.store.authenticated(),
        access_expires_at: access.as_ref().and_then(claims::expires_at),
        almost_expired: ctx.store.is_access_token_almost_expired(),
    };

    if args.json {
        return output::json_pretty(&summary);
    }

    output::field("API", summary.api_url);
    output::field("Authenticated", "yes");
    if let Some(access) = &access {
        output::expiry(access);
    }
    if summary.almost_expired {
        output::warn("Access token is about to expire; run 'socdist refresh-token'");
    }
    Ok(())
}
