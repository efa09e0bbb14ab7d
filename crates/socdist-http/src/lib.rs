//! socdist-http - reqwest-backed token endpoint client.

mod api;
mod client;
mod endpoints;

pub use api::HttpAuthApi;
