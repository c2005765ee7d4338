//! Candidates collection, keyed by candidate id.

use flow_core::entities::Candidate;

use crate::FlowStore;
use crate::error::StoreError;
use crate::helpers::{parse_datetime, parse_enum, parse_json, to_json};

const COLLECTION: &str = "candidates";
const SELECT_COLS: &str = "id, name, email, stage, job_id, applied_at, notes";

fn row_to_candidate(row: &libsql::Row) -> Result<Candidate, StoreError> {
    Ok(Candidate {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        stage: parse_enum(&row.get::<String>(3)?)?,
        job_id: row.get(4)?,
        applied_at: parse_datetime(&row.get::<String>(5)?)?,
        notes: parse_json(&row.get::<String>(6)?)?,
    })
}

fn candidate_params(candidate: &Candidate) -> Result<[libsql::Value; 7], StoreError> {
    Ok([
        candidate.id.clone().into(),
        candidate.name.clone().into(),
        candidate.email.clone().into(),
        candidate.stage.as_str().into(),
        candidate.job_id.clone().into(),
        candidate.applied_at.to_rfc3339().into(),
        to_json(&candidate.notes)?.into(),
    ])
}

impl FlowStore {
    /// Full snapshot of the candidates collection in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_candidates(&self) -> Result<Vec<Candidate>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM candidates ORDER BY rowid"),
                (),
            )
            .await?;
        let mut candidates = Vec::new();
        while let Some(row) = rows.next().await? {
            candidates.push(row_to_candidate(&row)?);
        }
        Ok(candidates)
    }

    /// Fetch one candidate by key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn get_candidate(&self, id: &str) -> Result<Option<Candidate>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM candidates WHERE id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_candidate(&row)?)),
            None => Ok(None),
        }
    }

    /// Add a new candidate; the key must not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateKey` if the id is already present.
    pub async fn insert_candidate(&self, candidate: &Candidate) -> Result<(), StoreError> {
        let _write = self.write_guard().await;
        self.conn()
            .execute(
                &format!(
                    "INSERT INTO candidates ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                libsql::params_from_iter(candidate_params(candidate)?),
            )
            .await
            .map_err(|e| StoreError::from_insert(e, COLLECTION, &candidate.id))?;
        Ok(())
    }

    /// Insert many candidates in one transaction (seeding path).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` and rolls back if any insert fails.
    pub async fn insert_candidates(&self, candidates: &[Candidate]) -> Result<(), StoreError> {
        let _write = self.write_guard().await;
        let tx = self.conn().transaction().await?;
        for candidate in candidates {
            tx.execute(
                &format!(
                    "INSERT INTO candidates ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                libsql::params_from_iter(candidate_params(candidate)?),
            )
            .await
            .map_err(|e| StoreError::from_insert(e, COLLECTION, &candidate.id))?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Upsert a candidate unconditionally. Preserves the row's insertion
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the statement fails.
    pub async fn put_candidate(&self, candidate: &Candidate) -> Result<(), StoreError> {
        let _write = self.write_guard().await;
        self.conn()
            .execute(
                &format!(
                    "INSERT INTO candidates ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                     ON CONFLICT(id) DO UPDATE SET
                       name = excluded.name, email = excluded.email,
                       stage = excluded.stage, job_id = excluded.job_id,
                       applied_at = excluded.applied_at, notes = excluded.notes"
                ),
                libsql::params_from_iter(candidate_params(candidate)?),
            )
            .await?;
        Ok(())
    }

    /// Number of candidates in the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn count_candidates(&self) -> Result<u32, StoreError> {
        let mut rows = self
            .conn()
            .query("SELECT COUNT(*) FROM candidates", ())
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("COUNT returned no row".into()))?;
        Ok(u32::try_from(row.get::<i64>(0)?).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use flow_core::entities::CandidateNote;
    use flow_core::enums::CandidateStage;
    use flow_core::ids::{PREFIX_CANDIDATE, generate_id};
    use pretty_assertions::assert_eq;

    fn sample_candidate(name: &str) -> Candidate {
        Candidate {
            id: generate_id(PREFIX_CANDIDATE),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            stage: CandidateStage::Applied,
            job_id: "job-1".into(),
            applied_at: Utc::now(),
            notes: vec![],
        }
    }

    #[tokio::test]
    async fn insert_and_get_roundtrip() {
        let store = FlowStore::open_memory().await.unwrap();
        let candidate = sample_candidate("Ada");
        store.insert_candidate(&candidate).await.unwrap();

        let fetched = store.get_candidate(&candidate.id).await.unwrap().unwrap();
        assert_eq!(fetched, candidate);
    }

    #[tokio::test]
    async fn notes_json_column_roundtrip() {
        let store = FlowStore::open_memory().await.unwrap();
        let mut candidate = sample_candidate("Grace");
        candidate.notes = vec![CandidateNote {
            text: "Strong systems background".into(),
            created_at: Utc::now(),
        }];
        store.insert_candidate(&candidate).await.unwrap();

        let fetched = store.get_candidate(&candidate.id).await.unwrap().unwrap();
        assert_eq!(fetched.notes.len(), 1);
        assert_eq!(fetched.notes[0].text, "Strong systems background");
    }

    #[tokio::test]
    async fn put_updates_stage_in_place() {
        let store = FlowStore::open_memory().await.unwrap();
        let mut candidate = sample_candidate("Linus");
        store.insert_candidate(&candidate).await.unwrap();

        candidate.stage = CandidateStage::Offer;
        store.put_candidate(&candidate).await.unwrap();

        let fetched = store.get_candidate(&candidate.id).await.unwrap().unwrap();
        assert_eq!(fetched.stage, CandidateStage::Offer);
        assert_eq!(store.count_candidates().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn batch_insert_is_atomic() {
        let store = FlowStore::open_memory().await.unwrap();
        let a = sample_candidate("Ada");
        let mut b = sample_candidate("Grace");
        b.id.clone_from(&a.id); // forced collision

        let result = store.insert_candidates(&[a, b]).await;
        assert!(matches!(result, Err(StoreError::DuplicateKey { .. })));
        assert_eq!(store.count_candidates().await.unwrap(), 0);
    }
}
