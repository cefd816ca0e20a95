//! Content-addressed cache for normalized uploads.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::Result;
use crate::normalize::{NormalizedTable, normalize_hashed};

/// SHA-256 of the upload bytes, hex encoded. This is the file identity.
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Whether a lookup reused the cached table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

#[derive(Debug, Clone)]
pub struct CachedLoad {
    pub table: Arc<NormalizedTable>,
    pub status: CacheStatus,
}

/// Single-entry cache keyed by upload content.
///
/// A new identity replaces the entry wholesale. A failed load leaves the
/// existing entry in place.
#[derive(Debug, Default)]
pub struct TableCache {
    entry: Option<(String, Arc<NormalizedTable>)>,
    hits: u64,
    misses: u64,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, source_name: &str, bytes: &[u8]) -> Result<CachedLoad> {
        let key = content_hash(bytes);
        if let Some((cached_key, table)) = &self.entry
            && *cached_key == key
        {
            self.hits += 1;
            debug!(source = source_name, hash = %key, "normalization cache hit");
            return Ok(CachedLoad {
                table: Arc::clone(table),
                status: CacheStatus::Hit,
            });
        }

        let table = Arc::new(normalize_hashed(source_name, bytes, key.clone())?);
        self.misses += 1;
        if self.entry.is_some() {
            info!(source = source_name, "new upload replaces cached table");
        }
        self.entry = Some((key, Arc::clone(&table)));
        Ok(CachedLoad {
            table,
            status: CacheStatus::Miss,
        })
    }

    pub fn current(&self) -> Option<&Arc<NormalizedTable>> {
        self.entry.as_ref().map(|(_, table)| table)
    }

    pub fn current_hash(&self) -> Option<&str> {
        self.entry.as_ref().map(|(key, _)| key.as_str())
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
