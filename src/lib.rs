//! linkvault - a small URL shortener
//!
//! Short links live in an in-memory table rebuilt at startup from an
//! append-only CSV log. Auto-generated ids come from a persisted counter
//! rendered in base-62.
//!
//! # Architecture
//! - `storage`: link log and counter file
//! - `services`: identifier allocation and the link store
//! - `api`: HTTP services (creation form, redirects, keyed API)
//! - `config`: TOML + environment configuration
//! - `runtime`: startup and execution modes (server, CLI)
//! - `system`: logging and the data directory lock

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
