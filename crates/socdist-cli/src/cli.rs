//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::commands::Command;

/// Log in, refresh tokens and walk the guarded routes of a socdist API.
#[derive(Parser, Debug)]
#[command(name = "socdist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the API lives and where the session is kept.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// REST API base URL
    #[arg(
        long,
        env = "SOCDIST_API_URL",
        default_value = "http://localhost:8000",
        global = true
    )]
    pub api_url: String,

    /// Directory holding persisted credentials [default: platform data dir]
    #[arg(long, env = "SOCDIST_STORAGE_DIR", global = true)]
    pub storage_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "socdist",
            "whoami",
            "--api-url",
            "https://api.example.com",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.global.api_url, "https://api.example.com");
        assert!(matches!(cli.command, Command::Whoami(_)));
    }

    #[test]
    fn navigate_requires_a_path() {
        assert!(Cli::try_parse_from(["socdist", "navigate"]).is_err());
    }
}
