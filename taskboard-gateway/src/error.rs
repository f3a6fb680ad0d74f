//! Error types for the gateway crate

use taskboard_kanban::KanbanError;
use thiserror::Error;

/// Result type for gateway setup and configuration
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failures that happen before a request reaches the server
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration could not be read or extracted
    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// The configured base URL is not a valid absolute URL
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The credential provider could not produce a token
    #[error("credentials unavailable: {0}")]
    Credentials(String),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl From<figment::Error> for GatewayError {
    fn from(e: figment::Error) -> Self {
        Self::Config(Box::new(e))
    }
}

impl From<GatewayError> for KanbanError {
    fn from(e: GatewayError) -> Self {
        KanbanError::fetch(None, Some(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_kanban::ErrorKind;

    #[test]
    fn test_converts_to_fetch_error() {
        let err: KanbanError = GatewayError::Credentials("session expired".into()).into();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert_eq!(
            err.user_message("load board"),
            "Failed to load board: credentials unavailable: session expired"
        );
    }
}
