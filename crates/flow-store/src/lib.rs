//! # flow-store
//!
//! libSQL-backed collections for the TalentFlow data layer.
//!
//! Handles all persisted state: the jobs, candidates, and assessments
//! collections, schema migrations, the snapshot query engine, the seed
//! initializer, and [`service::FlowService`], the only sanctioned write
//! path.
//!
//! The store is explicitly constructed and passed by reference (no ambient
//! singleton). All writes share one connection and queue behind a write
//! lock, so a multi-statement transaction never interleaves with another
//! write.

pub mod error;
pub mod helpers;
mod migrations;
pub mod patches;
pub mod query;
pub mod repos;
mod seed;
pub mod service;

pub use migrations::SCHEMA_VERSION;

use std::path::Path;

use error::StoreError;
use libsql::Builder;

/// Central handle for the three TalentFlow collections.
///
/// Wraps a libSQL database and connection. Repo methods (raw collection
/// access) are implemented as `impl FlowStore` in [`repos`].
pub struct FlowStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    // Writes share one connection; an unguarded write issued while a
    // transaction is open would silently join it and roll back with it.
    write_lock: tokio::sync::Mutex<()>,
    durable: bool,
}

impl FlowStore {
    /// Open (or create) the durable store at `path`. Idempotent.
    ///
    /// If durable storage is unavailable (the path cannot be created or
    /// opened), falls back to an in-memory store with identical semantics
    /// rather than failing outright.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` only if the in-memory fallback itself cannot be
    /// opened or migrations fail.
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                let _ = std::fs::create_dir_all(parent);
            }
        }
        match Self::open_at(path, true).await {
            Ok(store) => Ok(store),
            Err(e) => {
                tracing::warn!(path, error = %e, "durable store unavailable, falling back to memory");
                Self::open_memory().await
            }
        }
    }

    /// Open a non-durable in-memory store (same contract as [`Self::open`]).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the database cannot be opened or migrations
    /// fail.
    pub async fn open_memory() -> Result<Self, StoreError> {
        Self::open_at(":memory:", false).await
    }

    async fn open_at(path: &str, durable: bool) -> Result<Self, StoreError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        let store = Self {
            db,
            conn,
            write_lock: tokio::sync::Mutex::new(()),
            durable,
        };
        store.run_migrations().await?;
        tracing::debug!(path, durable, "store opened");
        Ok(store)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Serialize a write against every other write. Held for the full
    /// statement (or transaction) lifetime by each mutating repo method.
    pub(crate) async fn write_guard(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Whether records survive process restart (false for the memory
    /// fallback).
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        self.durable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> FlowStore {
        FlowStore::open_memory().await.unwrap()
    }

    #[tokio::test]
    async fn open_creates_collections() {
        let store = test_store().await;
        for table in ["jobs", "candidates", "assessments"] {
            let mut rows = store
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            assert!(
                rows.next().await.unwrap().is_some(),
                "collection '{table}' should exist"
            );
        }
    }

    #[tokio::test]
    async fn schema_version_is_stamped() {
        let store = test_store().await;
        assert_eq!(store.schema_version().await.unwrap(), SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let store = test_store().await;
        store.run_migrations().await.unwrap();
        store.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn open_is_idempotent_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talentflow.db");
        let path = path.to_str().unwrap();

        let first = FlowStore::open(path).await.unwrap();
        assert!(first.is_durable());
        drop(first);

        let second = FlowStore::open(path).await.unwrap();
        assert_eq!(second.schema_version().await.unwrap(), SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn unwritable_path_falls_back_to_memory() {
        // A directory path is not a valid database file.
        let dir = tempfile::tempdir().unwrap();
        let store = FlowStore::open(dir.path().to_str().unwrap()).await.unwrap();
        assert!(!store.is_durable());
        // Same contract: collections exist and accept writes.
        assert_eq!(store.schema_version().await.unwrap(), SCHEMA_VERSION);
    }
}
