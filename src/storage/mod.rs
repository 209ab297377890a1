//! Durable state: the append-only link log and the allocator counter file.

pub mod counter;
pub mod link_log;
pub mod models;

pub use counter::CounterFile;
pub use link_log::LinkLog;
pub use models::LinkRecord;
