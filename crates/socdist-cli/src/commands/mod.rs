//! Subcommand implementations.

mod login;
mod logout;
mod navigate;
mod refresh_token;
mod routes;
mod watch;
mod whoami;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::GlobalArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Exchange a username and password for a token pair
    Login(login::LoginArgs),

    /// End the session and forget persisted credentials
    Logout(logout::LogoutArgs),

    /// Display the active session
    Whoami(whoami::WhoamiArgs),

    /// Swap the access token for a fresh one
    RefreshToken(refresh_token::RefreshTokenArgs),

    /// Run a guarded navigation and report where it lands
    Navigate(navigate::NavigateArgs),

    /// List the application routes
    Routes(routes::RoutesArgs),

    /// Keep the session fresh until interrupted
    Watch(watch::WatchArgs),
}

pub async fn handle(global: GlobalArgs, command: Command) -> Result<()> {
    match command {
        Command::Login(args) => login::run(&global, args).await,
        Command::Logout(args) => logout::run(&global, args),
        Command::Whoami(args) => whoami::run(&global, args),
        Command::RefreshToken(args) => refresh_token::run(&global, args).await,
        Command::Navigate(args) => navigate::run(&global, args),
        Command::Routes(args) => routes::run(args),
        Command::Watch(args) => watch::run(&global, args).await,
    }
}
