use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::JobStatus;

/// A job posting. `order` defines the canonical board sequence: values need
/// not be contiguous, only totally orderable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub status: JobStatus,
    pub tags: Vec<String>,
    pub order: i64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Derive a URL-safe slug from a title: lowercase alphanumeric runs joined
/// by single dashes.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
