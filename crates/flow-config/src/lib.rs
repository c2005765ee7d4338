//! # flow-config
//!
//! Layered configuration loading for the TalentFlow data layer using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TALENTFLOW_*` prefix, `__` as separator)
//! 2. Project-level `.talentflow/config.toml`
//! 3. User-level `~/.config/talentflow/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TALENTFLOW_SIM__FAILURE_RATE` -> `sim.failure_rate`,
//! `TALENTFLOW_STORE__PATH` -> `store.path`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use flow_config::FlowConfig;
//!
//! let config = FlowConfig::load().expect("config");
//! println!("store path: {}", config.store.path);
//! ```

mod error;
mod seed;
mod sim;
mod store;

pub use error::ConfigError;
pub use seed::SeedConfig;
pub use sim::SimConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FlowConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

impl FlowConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`TALENTFLOW_*` prefix)
    /// 2. `.talentflow/config.toml` (project-local)
    /// 3. `~/.config/talentflow/config.toml` (user-global)
    /// 4. Default values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers
    /// on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".talentflow/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TALENTFLOW_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("talentflow").join("config.toml"))
    }
}
