/// Convenience result type used across scrollstage.
pub type StageResult<T> = Result<T, StageError>;

/// Top-level error taxonomy used by stage APIs.
///
/// Per-tick paths never produce these; they are reserved for loading, parsing and
/// construction work that happens outside the frame loop.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    /// Invalid user-provided configuration, descriptor or catalog data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or looking up cached render resources.
    #[error("cache error: {0}")]
    Cache(String),

    /// Errors raised by navigation requests (gallery modal, section jumps).
    #[error("navigation error: {0}")]
    Navigation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StageError {
    /// Build a [`StageError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StageError::Cache`] value.
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }

    /// Build a [`StageError::Navigation`] value.
    pub fn navigation(msg: impl Into<String>) -> Self {
        Self::Navigation(msg.into())
    }

    /// Build a [`StageError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
