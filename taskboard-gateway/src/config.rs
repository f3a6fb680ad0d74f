//! Configuration loading with figment.
//!
//! Sources are merged in precedence order, later ones overriding earlier:
//! 1. Built-in defaults
//! 2. `taskboard.toml`, `taskboard.yaml` or `taskboard.json` in the config directory
//! 3. `TASKBOARD_` environment variables, `__` separating nested keys
//!    (e.g. `TASKBOARD_GATEWAY__TIMEOUT_SECS=10`)

use crate::error::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use taskboard_kanban::KanbanSettings;
use tracing::debug;

/// Hosted taskboard backend
pub const DEFAULT_BASE_URL: &str = "https://it-developer-be-rathi.onrender.com/api/";

/// Request timeout when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "TASKBOARD_";

/// Base name of configuration files
pub const CONFIG_FILE_STEM: &str = "taskboard";

/// Connection settings for the REST API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// API root; endpoint paths such as `kanban/boards` are joined onto it
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("taskboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GatewayConfig {
    /// Point at another API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Everything a taskboard client needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskboardConfig {
    pub gateway: GatewayConfig,
    pub kanban: KanbanSettings,
}

impl TaskboardConfig {
    /// Load from the current directory and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Load with configuration files looked up in `dir`
    pub fn load_from(dir: &Path) -> Result<Self> {
        let config: Self = Self::figment(dir).extract()?;
        debug!(
            base_url = %config.gateway.base_url,
            timeout_secs = config.gateway.timeout_secs,
            policy = ?config.kanban.position_policy,
            "Loaded taskboard configuration"
        );
        Ok(config)
    }

    /// The merged figment, for callers that want to layer more providers
    pub fn figment(dir: &Path) -> Figment {
        let file = |ext: &str| dir.join(format!("{}.{}", CONFIG_FILE_STEM, ext));

        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(file("toml")))
            .merge(Yaml::file(file("yaml")))
            .merge(Json::file(file("json")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
