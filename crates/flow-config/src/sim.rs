//! Simulated-transport configuration.

use serde::{Deserialize, Serialize};

const fn default_latency_min_ms() -> u64 {
    200
}

const fn default_latency_max_ms() -> u64 {
    1200
}

const fn default_failure_rate() -> f64 {
    0.05
}

/// Latency and fault-injection knobs for the simulated transport.
///
/// Reads only pay latency; writes additionally fail with `failure_rate`
/// probability, before the underlying store call runs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimConfig {
    /// Lower latency bound, milliseconds (inclusive).
    #[serde(default = "default_latency_min_ms")]
    pub latency_min_ms: u64,

    /// Upper latency bound, milliseconds (inclusive).
    #[serde(default = "default_latency_max_ms")]
    pub latency_max_ms: u64,

    /// Probability in `[0, 1]` that a write raises a transient failure.
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            latency_min_ms: default_latency_min_ms(),
            latency_max_ms: default_latency_max_ms(),
            failure_rate: default_failure_rate(),
        }
    }
}

impl SimConfig {
    /// A configuration with no latency and no faults, for tests.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            latency_min_ms: 0,
            latency_max_ms: 0,
            failure_rate: 0.0,
        }
    }
}
