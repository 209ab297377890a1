//! Service layer
//!
//! The link store and identifier allocator, shared by the HTTP handlers
//! and the CLI.

pub mod allocator;
pub mod link_store;

pub use allocator::IdentifierAllocator;
pub use link_store::{LinkStore, RESERVED_IDS};
