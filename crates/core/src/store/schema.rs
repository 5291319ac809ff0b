//! Database schema setup.
//!
//! Uses a simple version table to track which setup steps have been
//! applied. Each step is a SQL batch that transforms the schema.

use std::num::ParseIntError;

use crate::error::Error;
use tokio_rusqlite::{Connection, params};

/// Setup list: (version, SQL).
///
/// Steps must be applied in order. The version number is an incrementing
/// integer used to track which steps have been applied. All steps are
/// idempotent using CREATE IF NOT EXISTS.
const SETUP: &[(&str, &str)] = &[("1", include_str!("../../migrations/001_content_cache.sql"))];

/// Apply any pending schema setup steps.
///
/// This creates the _schema table if it doesn't exist, checks the current
/// version, and applies any steps that haven't been run yet.
///
/// # Errors
///
/// Returns an error if a setup SQL batch fails to execute.
pub async fn run(conn: &Connection) -> Result<(), Error> {
    conn.call(|conn| -> Result<(), Error> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS _schema (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            )",
            [],
        )
        .map_err(Error::from)?;

        let current: i64 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM _schema", [], |row| {
                row.get(0)
            })
            .map_err(Error::from)?;

        for (version, sql) in SETUP {
            let version_num: i64 = version
                .parse()
                .map_err(|e: ParseIntError| Error::SchemaFailed(e.to_string()))?;
            if version_num > current {
                conn.execute_batch(sql)?;
                conn.execute(
                    "INSERT INTO _schema (version, applied_at) VALUES (?1, ?2)",
                    params![version_num, chrono::Utc::now().to_rfc3339()],
                )
                .map_err(Error::from)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_idempotent() {
        let conn = Connection::open_in_memory().await.unwrap();
        run(&conn).await.unwrap();
        run(&conn).await.unwrap();

        let has_table: bool = conn
            .call(|conn| {
                conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='content_cache')",
                    [],
                    |row| row.get(0),
                )
            })
            .await
            .unwrap();

        assert!(has_table);
    }

    #[tokio::test]
    async fn test_setup_version_tracking() {
        let conn = Connection::open_in_memory().await.unwrap();
        run(&conn).await.unwrap();

        let count: i64 = conn
            .call(|conn| conn.query_row("SELECT COUNT(*) FROM _schema", [], |row| row.get(0)))
            .await
            .unwrap();

        assert_eq!(count, SETUP.len() as i64);
    }
}
