//! System-level modules
//!
//! - Logging initialization
//! - Data directory lockfile

pub mod lockfile;
pub mod logging;

pub use lockfile::Lockfile;
pub use logging::init_logging;
