//! Identifier allocator
//!
//! Hands out base-62 identifiers from a persistent, monotonically
//! increasing counter. A value is only returned after the counter that
//! follows it is on disk, so a crash can never lead to reuse.

use tracing::trace;

use crate::errors::{LinkvaultError, Result};
use crate::storage::CounterFile;
use crate::utils::base62;

pub struct IdentifierAllocator {
    next: u64,
    file: CounterFile,
}

impl IdentifierAllocator {
    /// Resume from the value stored in `file` (0 if there is none).
    pub fn open(file: CounterFile) -> Result<Self> {
        let next = file.load()?;
        Ok(Self { next, file })
    }

    /// Allocate the next identifier.
    ///
    /// On a failed counter write the in-memory state is left untouched and
    /// the same value will be offered again.
    pub fn next(&mut self) -> Result<String> {
        let current = self.next;
        let following = current
            .checked_add(1)
            .ok_or_else(|| LinkvaultError::persistence("Identifier counter exhausted"))?;

        self.file.save(following)?;
        self.next = following;

        let id = base62::encode(current);
        trace!("Allocated id {} (counter {})", id, current);
        Ok(id)
    }

    /// The counter value the next call to [`next`](Self::next) will encode.
    pub fn peek(&self) -> u64 {
        self.next
    }
}
