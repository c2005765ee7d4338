//! Store (persistence) configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "talentflow.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Path to the libSQL database file. `":memory:"` for a non-durable store.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl StoreConfig {
    /// Whether the store is explicitly in-memory (non-durable).
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_durable() {
        let config = StoreConfig::default();
        assert_eq!(config.path, "talentflow.db");
        assert!(!config.is_memory());
    }
}
