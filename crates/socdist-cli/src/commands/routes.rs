//! Routes command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use socdist_session::RouteTable;

use crate::output;

#[derive(Args, Debug)]
pub struct RoutesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RouteEntry<'a> {
    path: &'a str,
    name: &'a str,
    view: &'static str,
}

pub fn run(args: RoutesArgs) -> Result<()> {
    let table = RouteTable::app();
    let entries: Vec<RouteEntry<'_>> = table
        .iter()
        .map(|route| RouteEntry {
            path: route.path(),
            name: route.name(),
            view: route.view().component(),
        })
        .collect();

    if args.json {
        return output::json_pretty(&entries);
    }

    for entry in &entries {
        println!("{:<14} {:<12} {}", entry.path, entry.name.dimmed(), entry.view);
    }
    Ok(())
}
