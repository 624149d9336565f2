//! Error types for the animation runtime.

use mimika_rig::EngineError;
use thiserror::Error;

/// Result type for motion operations.
pub type MotionResult<T> = Result<T, MotionError>;

/// Errors that can occur in the animation runtime.
///
/// The steady-state update paths never fail; errors only arise at the
/// boundary where untrusted gesture names enter the engine.
#[derive(Debug, Error)]
pub enum MotionError {
    /// A gesture name not in the catalog.
    #[error("unknown gesture: {name}")]
    UnknownGesture {
        /// The unrecognized name.
        name: String,
    },
}

impl EngineError for MotionError {
    fn code(&self) -> &'static str {
        match self {
            MotionError::UnknownGesture { .. } => "MOTION_001",
        }
    }

    fn category(&self) -> &'static str {
        "motion"
    }
}
