//! Link store
//!
//! The in-memory authority for id → target mappings. All mutation goes
//! through one write lock that also covers the allocator and the log, so
//! the table, the counter and the files never disagree.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::allocator::IdentifierAllocator;
use crate::config::StorageConfig;
use crate::errors::{LinkvaultError, Result};
use crate::storage::{CounterFile, LinkLog, LinkRecord};
use crate::utils::is_valid_alias;
use crate::utils::url_validator::validate_url;

/// Ids owned by the service's own routes. Never resolvable, never assignable.
pub const RESERVED_IDS: &[&str] = &["api", "api/create"];

enum Slot {
    Reserved,
    Target(String),
}

struct Inner {
    table: HashMap<String, Slot>,
    allocator: IdentifierAllocator,
    log: LinkLog,
}

impl Inner {
    /// Draw from the allocator until an id no custom alias has taken.
    fn next_free_id(&mut self) -> Result<String> {
        loop {
            let id = self.allocator.next()?;
            if !self.table.contains_key(&id) {
                return Ok(id);
            }
            debug!("Generated id {} already taken by an alias, skipping", id);
        }
    }
}

pub struct LinkStore {
    inner: RwLock<Inner>,
}

impl LinkStore {
    /// Load the store from the locations in `config`.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        Self::open_at(config.links_path(), config.counter_path())
    }

    /// Load the store from explicit file paths, creating an empty log if
    /// none exists yet.
    pub fn open_at<P: AsRef<Path>, Q: AsRef<Path>>(links_path: P, counter_path: Q) -> Result<Self> {
        let (log, links) = LinkLog::open(links_path)?;
        let allocator = IdentifierAllocator::open(CounterFile::new(counter_path))?;

        let mut table: HashMap<String, Slot> = links
            .into_iter()
            .map(|(id, target)| (id, Slot::Target(target)))
            .collect();

        for id in RESERVED_IDS {
            if let Some(Slot::Target(target)) = table.insert((*id).to_string(), Slot::Reserved) {
                warn!(
                    "Link log maps reserved id '{}' to {}; the entry is ignored",
                    id, target
                );
            }
        }

        info!(
            "Link store ready: {} links, next counter {}",
            table.len() - RESERVED_IDS.len(),
            allocator.peek()
        );

        Ok(Self {
            inner: RwLock::new(Inner {
                table,
                allocator,
                log,
            }),
        })
    }

    /// Create a mapping and return its id.
    ///
    /// `id` of `None` or `""` asks the allocator for one. A supplied alias
    /// that is already mapped or reserved fails with `AliasInUse` and leaves
    /// the existing mapping alone.
    pub fn create(&self, id: Option<&str>, target: &str) -> Result<String> {
        // The URL parser ignores surrounding whitespace; the stored target must too
        let target = target.trim();
        let mut inner = self.inner.write();

        let id = match id.filter(|s| !s.is_empty()) {
            Some(alias) => {
                if inner.table.contains_key(alias) {
                    return Err(LinkvaultError::alias_in_use(format!(
                        "Alias '{}' is already in use",
                        alias
                    )));
                }
                if !is_valid_alias(alias) {
                    return Err(LinkvaultError::invalid_alias(format!(
                        "Alias '{}' contains characters that cannot appear in a link",
                        alias
                    )));
                }
                validate_url(target)?;
                alias.to_string()
            }
            None => {
                validate_url(target)?;
                inner.next_free_id()?
            }
        };

        inner
            .table
            .insert(id.clone(), Slot::Target(target.to_string()));

        let record = LinkRecord::new(id.clone(), target);
        if let Err(e) = inner.log.append(&record) {
            inner.table.remove(&id);
            warn!("Rolled back link '{}' after failed append: {}", id, e);
            return Err(e);
        }

        debug!("Created link {} -> {}", id, target);
        Ok(id)
    }

    /// Look up the target for `id`. No I/O.
    pub fn resolve(&self, id: &str) -> Option<String> {
        match self.inner.read().table.get(id) {
            Some(Slot::Target(target)) => Some(target.clone()),
            _ => None,
        }
    }

    /// Number of stored links, reserved ids excluded.
    pub fn len(&self) -> usize {
        self.inner.read().table.len() - RESERVED_IDS.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored links, sorted by id.
    pub fn links(&self) -> Vec<LinkRecord> {
        let inner = self.inner.read();
        let mut links: Vec<LinkRecord> = inner
            .table
            .iter()
            .filter_map(|(id, slot)| match slot {
                Slot::Target(target) => Some(LinkRecord::new(id.clone(), target.clone())),
                Slot::Reserved => None,
            })
            .collect();
        links.sort_by(|a, b| a.id.cmp(&b.id));
        links
    }

    /// Counter value the next generated id will encode.
    pub fn next_counter(&self) -> u64 {
        self.inner.read().allocator.peek()
    }
}
