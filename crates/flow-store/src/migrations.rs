//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and applies them on store
//! open, gated on `PRAGMA user_version`. Statements use `IF NOT EXISTS` so a
//! re-run against an already-migrated database is harmless; schema changes
//! require appending a new numbered migration and bumping `SCHEMA_VERSION`.

use crate::FlowStore;
use crate::error::StoreError;

/// Current schema version. Bump together with a new migration file.
pub const SCHEMA_VERSION: i64 = 1;

/// Initial schema: 3 collection tables, 4 indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl FlowStore {
    /// Run pending migrations in sequence and stamp the schema version.
    pub(crate) async fn run_migrations(&self) -> Result<(), StoreError> {
        let version = self.schema_version().await?;
        if version >= SCHEMA_VERSION {
            return Ok(());
        }

        if version < 1 {
            self.conn()
                .execute_batch(MIGRATION_001)
                .await
                .map_err(|e| StoreError::Migration(format!("001_initial: {e}")))?;
        }

        self.conn()
            .execute(&format!("PRAGMA user_version = {SCHEMA_VERSION}"), ())
            .await
            .map_err(|e| StoreError::Migration(format!("user_version stamp: {e}")))?;
        Ok(())
    }

    /// Read the stamped schema version.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the PRAGMA query fails.
    pub async fn schema_version(&self) -> Result<i64, StoreError> {
        let mut rows = self.conn().query("PRAGMA user_version", ()).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("PRAGMA user_version returned no row".into()))?;
        Ok(row.get::<i64>(0)?)
    }
}
