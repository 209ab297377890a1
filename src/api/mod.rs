//! HTTP surface: creation form, redirect route and the keyed creation API.

pub mod api_key;
pub mod middleware;
pub mod services;

pub use api_key::ApiKey;
pub use services::{AppState, configure};
