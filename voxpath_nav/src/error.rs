// Error type for configuration and scene loading.
//
// Search outcomes are not errors: an unreachable goal or an exhausted
// iteration budget comes back as `success: false` in the result. `NavError`
// only covers inputs that cannot be used at all.

/// Core error type for the pathfinding engine.
#[derive(thiserror::Error, Debug)]
pub enum NavError {
    /// Agent height must be at least one voxel.
    #[error("agent height must be positive, got {0}")]
    InvalidAgentHeight(i32),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout the voxpath codebase.
pub type NavResult<T> = Result<T, NavError>;
