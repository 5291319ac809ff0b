//! Content entry CRUD operations.
//!
//! Provides functions for reading, writing, and purging cached content
//! fields, plus the `ContentStore` implementation for `CacheDb`.

use async_trait::async_trait;

use super::ContentStore;
use super::connection::CacheDb;
use crate::content::ContentField;
use crate::error::Error;
use crate::key::ContentKey;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

impl CacheDb {
    /// Insert or update one content field for a key.
    ///
    /// Uses UPSERT semantics: inserts if the (location, service, kind) row
    /// doesn't exist, replaces the content if it does.
    pub async fn upsert_entry(&self, key: &ContentKey, field: ContentField, value: &str) -> Result<(), Error> {
        let key = key.clone();
        let value = value.to_string();
        let created_at = chrono::Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT INTO content_cache (location, service, kind, content, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(location, service, kind) DO UPDATE SET
                         content = excluded.content,
                         created_at = excluded.created_at",
                    params![&key.location, &key.service, field.as_str(), &value, &created_at],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Get one content field for a key.
    ///
    /// Returns None if the field hasn't been generated yet.
    pub async fn get_entry(&self, key: &ContentKey, field: ContentField) -> Result<Option<String>, Error> {
        let key = key.clone();
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let result = conn.query_row(
                    "SELECT content FROM content_cache
                     WHERE location = ?1 AND service = ?2 AND kind = ?3",
                    params![&key.location, &key.service, field.as_str()],
                    |row| row.get(0),
                );

                match result {
                    Ok(content) => Ok(Some(content)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Delete every entry for a location.
    ///
    /// Returns the number of deleted rows.
    pub async fn purge_location(&self, location: &str) -> Result<u64, Error> {
        let location = location.trim().to_lowercase();
        if location.is_empty() {
            return Err(Error::InvalidInput("location cannot be empty".to_string()));
        }

        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM content_cache WHERE location = ?1", params![location])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Purge oldest entries until count <= max_entries.
    ///
    /// Returns the number of deleted rows.
    pub async fn purge_lru(&self, max_entries: usize) -> Result<u64, Error> {
        let max = max_entries as i64;
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM content_cache", [], |row| row.get(0))?;
                if count <= max {
                    return Ok(0);
                }

                let to_delete = count - max;
                let deleted = conn.execute(
                    "DELETE FROM content_cache WHERE rowid IN (
                        SELECT rowid FROM content_cache ORDER BY created_at ASC LIMIT ?1
                    )",
                    params![to_delete],
                )?;
                Ok(deleted as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Number of cached field rows.
    pub async fn entry_count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM content_cache", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl ContentStore for CacheDb {
    async fn get(&self, key: &ContentKey, field: ContentField) -> Result<Option<String>, Error> {
        self.get_entry(key, field).await
    }

    async fn put(&self, key: &ContentKey, field: ContentField, value: &str) -> Result<(), Error> {
        self.upsert_entry(key, field, value).await
    }
}
