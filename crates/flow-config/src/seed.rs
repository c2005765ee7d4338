//! Seed-data configuration.

use serde::{Deserialize, Serialize};

const fn default_jobs() -> u32 {
    25
}

const fn default_candidates() -> u32 {
    1000
}

const fn default_assessments() -> u32 {
    3
}

const fn default_rng_seed() -> u64 {
    0x5eed_cafe
}

/// Cardinalities and RNG seed for the one-time synthetic dataset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedConfig {
    #[serde(default = "default_jobs")]
    pub jobs: u32,

    #[serde(default = "default_candidates")]
    pub candidates: u32,

    /// Number of leading seeded jobs that receive an assessment.
    #[serde(default = "default_assessments")]
    pub assessments: u32,

    /// Fixed RNG seed, so the synthetic dataset is deterministic.
    #[serde(default = "default_rng_seed")]
    pub rng_seed: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
            candidates: default_candidates(),
            assessments: default_assessments(),
            rng_seed: default_rng_seed(),
        }
    }
}
