//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use socdist_session::SessionConfig;

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long, env = "SOCDIST_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(global: &GlobalArgs, args: LoginArgs) -> Result<()> {
    let ctx = context::open(global, SessionConfig::default())?;

    eprintln!("{}", "Logging in...".dimmed());

    let navigation = ctx
        .store
        .login(&args.username, &args.password)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("API", &global.api_url);
    output::field("Landed on", navigation.location().as_str());
    if let Some(access) = ctx.store.access_token() {
        output::expiry(&access);
    }

    ctx.teardown();
    Ok(())
}
