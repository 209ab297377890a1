//! Execution modes
//!
//! - `server`: HTTP server
//! - `cli`: one-shot commands against the data directory

pub mod cli;
pub mod server;

pub use cli::run_cli;
pub use server::run_server;
