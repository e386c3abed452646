//! Error types for the board engine

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// A task was dropped onto itself
    #[error("task {id} dropped onto itself")]
    SelfMove { id: String },

    /// Neighbor task not present in the destination partition
    #[error("neighbor {id} not found in destination partition")]
    NeighborNotFound { id: String },

    /// Task has no usable position key - a data-integrity defect, never
    /// silently defaulted
    #[error("task {id} has no usable position key")]
    MissingPositionKey { id: String },

    /// `generate` was called with bounds out of order - a caller contract
    /// defect, not a recoverable runtime condition
    #[error("position key bounds out of order: {before:?} >= {after:?}")]
    KeyOrderViolation { before: String, after: String },

    /// A position key failed validation
    #[error("invalid position key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Undo window elapsed before the handle was invoked
    #[error("undo window expired")]
    UndoExpired,

    /// Undo handle was already reverted or dismissed
    #[error("undo handle is no longer armed")]
    UndoSpent,

    /// Persistence rejected a committed diff
    #[error("storage error: {message}")]
    Storage { message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an invalid key error
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is a rejected move request.
    ///
    /// Rejected moves are recovered locally: the caller logs them and leaves
    /// all state untouched. They never surface as user-facing errors.
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            Self::SelfMove { .. } | Self::TaskNotFound { .. } | Self::NeighborNotFound { .. }
        )
    }
}
