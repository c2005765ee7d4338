//! Assessments collection, keyed by job id. Upsert-only lifecycle.

use flow_core::entities::{Assessment, Section};

use crate::FlowStore;
use crate::error::StoreError;
use crate::helpers::{parse_json, to_json};

const SELECT_COLS: &str = "job_id, title, sections";

fn row_to_assessment(row: &libsql::Row) -> Result<Assessment, StoreError> {
    let sections: Vec<Section> = parse_json(&row.get::<String>(2)?)?;
    Ok(Assessment {
        job_id: row.get(0)?,
        title: row.get(1)?,
        sections,
    })
}

impl FlowStore {
    /// Fetch the assessment for a job, if one has been authored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn get_assessment(&self, job_id: &str) -> Result<Option<Assessment>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM assessments WHERE job_id = ?1"),
                [job_id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_assessment(&row)?)),
            None => Ok(None),
        }
    }

    /// Upsert an assessment unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the statement fails.
    pub async fn put_assessment(&self, assessment: &Assessment) -> Result<(), StoreError> {
        let _write = self.write_guard().await;
        self.conn()
            .execute(
                &format!(
                    "INSERT INTO assessments ({SELECT_COLS}) VALUES (?1, ?2, ?3)
                     ON CONFLICT(job_id) DO UPDATE SET
                       title = excluded.title, sections = excluded.sections"
                ),
                libsql::params![
                    assessment.job_id.as_str(),
                    assessment.title.as_str(),
                    to_json(&assessment.sections)?
                ],
            )
            .await?;
        Ok(())
    }

    /// Number of assessments in the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn count_assessments(&self) -> Result<u32, StoreError> {
        let mut rows = self
            .conn()
            .query("SELECT COUNT(*) FROM assessments", ())
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("COUNT returned no row".into()))?;
        Ok(u32::try_from(row.get::<i64>(0)?).unwrap_or(0))
    }
}
