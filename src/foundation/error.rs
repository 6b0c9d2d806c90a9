/// Convenience result type used across the crate.
pub type AquarelleResult<T> = Result<T, AquarelleError>;

/// Top-level error taxonomy used by the paint engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum AquarelleError {
    /// Invalid user-provided configuration or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Precondition violations on polygon data (empty vertex list,
    /// non-finite coordinates, out-of-range surface dimensions).
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors configuring audio analysis.
    #[error("audio error: {0}")]
    Audio(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AquarelleError {
    /// Build an [`AquarelleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AquarelleError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build an [`AquarelleError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build an [`AquarelleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
