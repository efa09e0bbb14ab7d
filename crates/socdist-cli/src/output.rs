//! Output formatting helpers.

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use socdist_core::AccessToken;
use socdist_core::claims;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning to stderr.
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print when an access token expires, relative to now.
pub fn expiry(token: &AccessToken) {
    let now = Utc::now();
    let value = match (claims::expires_at(token), claims::time_remaining(token, now)) {
        (Some(at), Some(left)) => {
            format!("{} (in {}s)", at.to_rfc3339(), left.num_seconds())
        }
        (Some(at), _) => format!("{} ({})", at.to_rfc3339(), "expired".red()),
        (None, _) => "unknown".to_string(),
    };
    field("Access expires", &value);
}
