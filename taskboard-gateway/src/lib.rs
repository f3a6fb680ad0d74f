//! HTTP gateway for the taskboard kanban engine
//!
//! [`HttpGateway`] implements [`taskboard_kanban::KanbanGateway`] against the
//! taskboard REST API. Configuration is loaded with figment from defaults,
//! `taskboard.{toml,yaml,json}` and `TASKBOARD_*` environment variables, and
//! the bearer token comes from an injected [`CredentialProvider`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskboard_gateway::{connect, EnvToken, TaskboardConfig};
//! use taskboard_kanban::{board::OpenBoard, Execute};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TaskboardConfig::load()?;
//! let ctx = connect(&config, Arc::new(EnvToken::default().required()))?;
//! let board = OpenBoard::new().execute(&ctx).await?;
//! println!("{} has {} cards", board.name, ctx.store().card_count());
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod error;

use std::sync::Arc;
use taskboard_kanban::BoardContext;

pub use auth::{Anonymous, CredentialProvider, EnvToken, RequiredToken, StaticToken, TOKEN_ENV_VAR};
pub use client::HttpGateway;
pub use config::{
    GatewayConfig, TaskboardConfig, CONFIG_FILE_STEM, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS,
    ENV_PREFIX,
};
pub use error::{GatewayError, Result};

/// Build a board context talking HTTP, with the configured kanban settings
pub fn connect(
    config: &TaskboardConfig,
    credentials: Arc<dyn CredentialProvider>,
) -> Result<BoardContext<HttpGateway>> {
    let gateway = HttpGateway::new(&config.gateway, credentials)?;
    tracing::info!(base_url = %gateway.base_url(), "Connected taskboard gateway");
    Ok(BoardContext::new(Arc::new(gateway)).with_settings(config.kanban.clone()))
}
