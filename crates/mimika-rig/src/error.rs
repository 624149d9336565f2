//! Error types for the rig data model.

use thiserror::Error;

/// Result type for rig operations.
pub type RigResult<T> = Result<T, RigError>;

/// Common reporting interface for engine errors.
///
/// Every error enum in the workspace implements this, giving callers a
/// stable machine-readable code and a coarse category for diagnostics.
pub trait EngineError: std::error::Error {
    /// Stable error code, e.g. `"RIG_001"`.
    fn code(&self) -> &'static str;

    /// Coarse category, e.g. `"rig"`, `"motion"`, `"speech"`.
    fn category(&self) -> &'static str;
}

/// Errors that can occur loading or addressing a rig.
#[derive(Debug, Error)]
pub enum RigError {
    /// A bone name not in the closed role set.
    #[error("unknown bone role: {name}")]
    UnknownBone {
        /// The unrecognized name.
        name: String,
    },

    /// An expression channel name not in the closed set.
    #[error("unknown expression channel: {name}")]
    UnknownExpression {
        /// The unrecognized name.
        name: String,
    },

    /// A rig descriptor that parsed but is not usable.
    #[error("invalid rig descriptor: {message}")]
    InvalidDescriptor {
        /// What is wrong with it.
        message: String,
    },

    /// JSON (de)serialization failure.
    #[error("rig descriptor parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RigError {
    /// Creates an invalid-descriptor error.
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            message: message.into(),
        }
    }
}

impl EngineError for RigError {
    fn code(&self) -> &'static str {
        match self {
            RigError::UnknownBone { .. } => "RIG_001",
            RigError::UnknownExpression { .. } => "RIG_002",
            RigError::InvalidDescriptor { .. } => "RIG_003",
            RigError::Parse(_) => "RIG_004",
        }
    }

    fn category(&self) -> &'static str {
        "rig"
    }
}
