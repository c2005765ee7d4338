//! Jobs collection, keyed by job id.

use flow_core::entities::Job;

use crate::FlowStore;
use crate::error::StoreError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_json, to_json};

const COLLECTION: &str = "jobs";
const SELECT_COLS: &str = "id, title, slug, status, tags, ord, description, created_at";

fn row_to_job(row: &libsql::Row) -> Result<Job, StoreError> {
    Ok(Job {
        id: row.get(0)?,
        title: row.get(1)?,
        slug: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        tags: parse_json(&row.get::<String>(4)?)?,
        order: row.get(5)?,
        description: get_opt_string(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

fn job_params(job: &Job) -> Result<[libsql::Value; 8], StoreError> {
    Ok([
        job.id.clone().into(),
        job.title.clone().into(),
        job.slug.clone().into(),
        job.status.as_str().into(),
        to_json(&job.tags)?.into(),
        job.order.into(),
        job.description
            .clone()
            .map_or(libsql::Value::Null, Into::into),
        job.created_at.to_rfc3339().into(),
    ])
}

impl FlowStore {
    /// Full snapshot of the jobs collection in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM jobs ORDER BY rowid"),
                (),
            )
            .await?;
        let mut jobs = Vec::new();
        while let Some(row) = rows.next().await? {
            jobs.push(row_to_job(&row)?);
        }
        Ok(jobs)
    }

    /// Fetch one job by key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn get_job(&self, id: &str) -> Result<Option<Job>, StoreError> {
        let mut rows = self
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM jobs WHERE id = ?1"), [id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_job(&row)?)),
            None => Ok(None),
        }
    }

    /// Add a new job; the key must not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateKey` if the id is already present.
    pub async fn insert_job(&self, job: &Job) -> Result<(), StoreError> {
        let _write = self.write_guard().await;
        self.conn()
            .execute(
                &format!(
                    "INSERT INTO jobs ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                ),
                libsql::params_from_iter(job_params(job)?),
            )
            .await
            .map_err(|e| StoreError::from_insert(e, COLLECTION, &job.id))?;
        Ok(())
    }

    /// Insert many jobs in one transaction (seeding path).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` and rolls back if any insert fails.
    pub async fn insert_jobs(&self, jobs: &[Job]) -> Result<(), StoreError> {
        let _write = self.write_guard().await;
        let tx = self.conn().transaction().await?;
        for job in jobs {
            tx.execute(
                &format!(
                    "INSERT INTO jobs ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                ),
                libsql::params_from_iter(job_params(job)?),
            )
            .await
            .map_err(|e| StoreError::from_insert(e, COLLECTION, &job.id))?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Upsert a job unconditionally. Preserves the row's insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the statement fails.
    pub async fn put_job(&self, job: &Job) -> Result<(), StoreError> {
        let _write = self.write_guard().await;
        self.conn()
            .execute(
                &format!(
                    "INSERT INTO jobs ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                     ON CONFLICT(id) DO UPDATE SET
                       title = excluded.title, slug = excluded.slug,
                       status = excluded.status, tags = excluded.tags,
                       ord = excluded.ord, description = excluded.description,
                       created_at = excluded.created_at"
                ),
                libsql::params_from_iter(job_params(job)?),
            )
            .await?;
        Ok(())
    }

    /// Number of jobs in the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn count_jobs(&self) -> Result<u32, StoreError> {
        let mut rows = self.conn().query("SELECT COUNT(*) FROM jobs", ()).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("COUNT returned no row".into()))?;
        Ok(u32::try_from(row.get::<i64>(0)?).unwrap_or(0))
    }

    /// Highest `order` value currently assigned (0 when empty).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn max_job_order(&self) -> Result<i64, StoreError> {
        let mut rows = self
            .conn()
            .query("SELECT COALESCE(MAX(ord), 0) FROM jobs", ())
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("MAX returned no row".into()))?;
        Ok(row.get::<i64>(0)?)
    }

    /// Rewrite `order` values for the given jobs, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` (and commits nothing) if any id is
    /// absent.
    pub async fn update_job_orders(&self, changes: &[(String, i64)]) -> Result<(), StoreError> {
        let _write = self.write_guard().await;
        let tx = self.conn().transaction().await?;
        for (id, order) in changes {
            let affected = tx
                .execute(
                    "UPDATE jobs SET ord = ?1 WHERE id = ?2",
                    libsql::params![*order, id.as_str()],
                )
                .await?;
            if affected == 0 {
                return Err(StoreError::NotFound {
                    collection: COLLECTION,
                    key: id.clone(),
                });
            }
        }
        tx.commit().await?;
        Ok(())
    }
}
