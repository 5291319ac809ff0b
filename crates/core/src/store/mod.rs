//! SQLite-backed content cache.
//!
//! This module provides a persistent cache for generated page content using
//! SQLite with async access via tokio-rusqlite. It supports:
//!
//! - One row per (location, service, field) with UPSERT write semantics
//! - Versioned schema setup on open
//! - WAL mode for concurrent access
//! - Maintenance operations (purge by location, LRU cap)

pub mod connection;
pub mod entries;
pub mod schema;

use async_trait::async_trait;

use crate::content::ContentField;
use crate::error::Error;
use crate::key::ContentKey;

pub use connection::CacheDb;

/// Read/write surface of the content cache.
///
/// The resolver only ever reads; writes come from generator implementations
/// (the persistence side effect) and maintenance tooling. Absence is a
/// legitimate "not yet generated" signal, not an error.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Stored value for one field of a key, or `None` if not yet generated.
    async fn get(&self, key: &ContentKey, field: ContentField) -> Result<Option<String>, Error>;

    /// Insert or replace one field of a key.
    async fn put(&self, key: &ContentKey, field: ContentField, value: &str) -> Result<(), Error>;
}
