//! Raw collection access, one module per collection.
//!
//! These methods implement the storage contract (ordered `list_*`
//! (insertion order), keyed `get_*`, `insert_*` (fails on duplicate key),
//! and `put_*` as unconditional upsert) and nothing else. Validation and
//! canonical record construction live in [`crate::service`].

mod assessment;
mod candidate;
mod job;
