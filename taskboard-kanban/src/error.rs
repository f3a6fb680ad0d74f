//! Error types for the kanban board engine

use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Fallback text when a failure carries no message
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// User-facing text for conflicts
pub const CONFLICT_MESSAGE: &str = "this task was changed elsewhere";

/// Errors that can occur in kanban operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// The caller's intent is invalid or incomplete. Never sent to the gateway.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// Card is not in the store
    #[error("card not found: {id}")]
    CardNotFound { id: String },

    /// Column is not in the store
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// No board has been loaded into the store yet
    #[error("no board loaded")]
    BoardNotLoaded,

    /// A gateway request failed (network failure or non-success status)
    #[error("request failed: {}", .message.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Fetch {
        status: Option<u16>,
        message: Option<String>,
    },

    /// A gateway request did not complete in time
    #[error("request timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    /// The server no longer knows the referenced card or column
    #[error("conflict: {}", .message.as_deref().unwrap_or(CONFLICT_MESSAGE))]
    Conflict { message: Option<String> },

    /// Response body could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Fetch,
    Conflict,
}

impl KanbanError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a fetch error from an optional status and server message
    pub fn fetch(status: Option<u16>, message: Option<String>) -> Self {
        Self::Fetch { status, message }
    }

    /// Create a conflict error
    pub fn conflict(message: Option<String>) -> Self {
        Self::Conflict { message }
    }

    /// Create a card-not-found error
    pub fn card_not_found(id: impl ToString) -> Self {
        Self::CardNotFound { id: id.to_string() }
    }

    /// Create a column-not-found error
    pub fn column_not_found(id: impl ToString) -> Self {
        Self::ColumnNotFound { id: id.to_string() }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. }
            | Self::CardNotFound { .. }
            | Self::ColumnNotFound { .. }
            | Self::BoardNotLoaded => ErrorKind::Validation,
            Self::Fetch { .. } | Self::Timeout { .. } | Self::Json(_) => ErrorKind::Fetch,
            Self::Conflict { .. } => ErrorKind::Conflict,
        }
    }

    /// True if the failure came back from (or on the way to) the gateway
    /// and therefore required a rollback of the optimistic mutation
    pub fn requires_rollback(&self) -> bool {
        matches!(self.kind(), ErrorKind::Fetch | ErrorKind::Conflict)
    }

    /// The bare message shown to users, without the operation prefix
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::Fetch { message, .. } => message
                .clone()
                .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            Self::Conflict { .. } => CONFLICT_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Operation-specific message, e.g. "Failed to create task: Title taken"
    pub fn user_message(&self, action: &str) -> String {
        format!("Failed to {}: {}", action, self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KanbanError::CardNotFound {
            id: "abc123".into(),
        };
        assert_eq!(err.to_string(), "card not found: abc123");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            KanbanError::validation("title is required").kind(),
            ErrorKind::Validation
        );
        assert_eq!(KanbanError::Timeout { elapsed_ms: 10 }.kind(), ErrorKind::Fetch);
        assert_eq!(KanbanError::conflict(None).kind(), ErrorKind::Conflict);
        assert!(KanbanError::fetch(Some(500), None).requires_rollback());
        assert!(!KanbanError::BoardNotLoaded.requires_rollback());
    }

    #[test]
    fn test_user_message_fallback() {
        let err = KanbanError::fetch(Some(500), None);
        assert_eq!(
            err.user_message("create task"),
            "Failed to create task: Unknown error"
        );

        let err = KanbanError::fetch(Some(400), Some("Title too long".into()));
        assert_eq!(
            err.user_message("create task"),
            "Failed to create task: Title too long"
        );
    }

    #[test]
    fn test_conflict_message() {
        let err = KanbanError::conflict(Some("Card not found".into()));
        assert_eq!(
            err.user_message("move task"),
            "Failed to move task: this task was changed elsewhere"
        );
    }
}
