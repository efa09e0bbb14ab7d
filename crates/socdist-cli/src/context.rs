//! Building a session context from the global arguments.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use socdist_core::ApiUrl;
use socdist_http::HttpAuthApi;
use socdist_session::{FileStorage, SessionConfig, SessionContext};

use crate::cli::GlobalArgs;

/// Resolve the storage directory, falling back to the platform data dir.
fn storage_dir(args: &GlobalArgs) -> Result<PathBuf> {
    if let Some(dir) = &args.storage_dir {
        return Ok(dir.clone());
    }

    let dirs =
        ProjectDirs::from("", "", "socdist").context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Open the session persisted under the storage directory.
pub fn open(args: &GlobalArgs, config: SessionConfig) -> Result<SessionContext> {
    let api_url = ApiUrl::new(&args.api_url).context("Invalid API URL")?;
    let api = HttpAuthApi::new(api_url).context("Failed to build HTTP client")?;
    let storage = FileStorage::in_dir(storage_dir(args)?);

    tracing::debug!(path = %storage.path().display(), "Using file storage");

    Ok(SessionContext::create(
        Arc::new(api),
        Arc::new(storage),
        config,
    ))
}

/// Fail with a hint unless a session was restored.
pub fn require_session(ctx: &SessionContext) -> Result<()> {
    if !ctx.store.authenticated() {
        anyhow::bail!("No active session. Run 'socdist login' first.");
    }
    Ok(())
}
