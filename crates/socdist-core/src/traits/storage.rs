//! Local key-value persistence trait.

use crate::Result;

/// A string key-value store shaped like the browser's `localStorage`.
///
/// Calls are synchronous; backends are expected to be local and fast.
pub trait LocalStorage: Send + Sync {
    /// Read a value. A missing key is `Ok(None)`, not an error.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Removing a missing key succeeds.
    fn remove_item(&self, key: &str) -> Result<()>;
}
