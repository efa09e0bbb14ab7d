//! Validated value types.

mod api_url;
mod route_path;

pub use api_url::{ApiUrl, TOKEN_PATH, TOKEN_REFRESH_PATH};
pub use route_path::RoutePath;
