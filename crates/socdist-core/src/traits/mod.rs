//! Seams to the collaborators the session layer drives.

mod auth_api;
mod navigator;
mod storage;

pub use auth_api::AuthApi;
pub use navigator::{Navigation, Navigator};
pub use storage::LocalStorage;
