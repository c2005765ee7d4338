//! Shallow-merge patch builders.
//!
//! A patch field of `None` leaves the stored value untouched; `Some(_)`
//! overrides it. Clearable optional fields use `Option<Option<_>>` so a
//! caller can distinguish "don't touch" from "set to NULL".

mod candidate;
mod job;

pub use candidate::{CandidatePatch, CandidatePatchBuilder};
pub use job::{JobPatch, JobPatchBuilder};
