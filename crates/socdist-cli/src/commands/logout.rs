//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use socdist_session::SessionConfig;

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub fn run(global: &GlobalArgs, _args: LogoutArgs) -> Result<()> {
    let ctx = context::open(global, SessionConfig::default())?;

    if !ctx.store.authenticated() {
        output::warn("No active session");
    }

    let navigation = ctx.store.logout().context("Failed to logout")?;

    output::success("Logged out");
    output::field("Landed on", navigation.location().as_str());
    Ok(())
}
