/// Result alias used across the crate.
pub type MotionResult<T> = Result<T, MotionError>;

/// Errors surfaced by the choreography engine.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid input to a component (unknown resource key, bad thresholds, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration could not be accepted.
    #[error("config error: {0}")]
    Config(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all for wrapped foreign errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`MotionError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
