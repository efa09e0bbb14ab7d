//! Navigate command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use socdist_core::{Navigation, RoutePath};
use socdist_session::{GuardMode, SessionConfig};

use crate::cli::GlobalArgs;
use crate::{context, output};

#[derive(Args, Debug)]
pub struct NavigateArgs {
    /// Path to open, e.g. /profile or /search?q=bob
    pub path: String,

    /// Let anonymous users through every route
    #[arg(long)]
    pub permissive: bool,
}

pub fn run(global: &GlobalArgs, args: NavigateArgs) -> Result<()> {
    let to = RoutePath::new(&args.path).context("Invalid route path")?;

    let config = SessionConfig {
        guard_mode: if args.permissive {
            GuardMode::Permissive
        } else {
            GuardMode::Enforce
        },
        ..SessionConfig::default()
    };
    let ctx = context::open(global, config)?;

    let navigation = ctx.navigate(&to).context("Navigation failed")?;

    match &navigation {
        Navigation::Committed { to } => {
            output::success(&format!("Opened {}", to));
        }
        Navigation::Redirected { requested, to } => {
            println!("{} {} -> {}", "REDIRECT".yellow(), requested, to);
        }
    }

    if let Some(route) = ctx.router.current_route() {
        output::field("Route", route.name());
        output::field("View", route.view().component());
    }
    Ok(())
}
