//! # flow-core
//!
//! Core types for the TalentFlow data layer.
//!
//! This crate provides the foundational types shared across all flow crates:
//! - Entity structs for the three collections (jobs, candidates, assessments)
//! - Status enums and the question tagged union
//! - Pagination request/result envelopes
//! - Prefixed, time-derived ID generation
//! - Validation error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod page;
