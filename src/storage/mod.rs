// Key-value storage for cached responses.
// The cache stage is agnostic to which backend is injected.

#![allow(dead_code, unused_imports)]

pub mod disk;
pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http::message::Response;

pub use disk::DiskStore;
pub use memory::MemoryStore;

/// A stored response snapshot. Entries are replaced wholesale on refresh,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub response: Response,
    /// Wall-clock time the response went into the store.
    pub received_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(response: Response) -> Self {
        Self {
            response,
            received_at: Utc::now(),
        }
    }

    /// Age of the entry in whole seconds.
    pub fn age_seconds(&self) -> i64 {
        Utc::now().signed_duration_since(self.received_at).num_seconds()
    }
}

/// Pluggable get/set backend keyed by normalized request URL.
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>>;
    fn set(&self, key: &str, entry: CacheEntry) -> Result<()>;
}
