/// Convenience result type used across pixmill.
pub type PixmillResult<T> = Result<T, PixmillError>;

/// Top-level error taxonomy used by canvas, encoder and scene APIs.
///
/// Rasterizer operations never produce errors; they clip instead.
#[derive(thiserror::Error, Debug)]
pub enum PixmillError {
    /// Invalid caller-provided arguments (empty buffers, zero or mismatched dimensions).
    #[error("validation error: {0}")]
    Validation(String),

    /// Pixel or plane storage could not be reserved.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// Serialized output disagreed with its precomputed size.
    #[error("consistency error: {0}")]
    Consistency(String),

    /// Errors when deserializing scene descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixmillError {
    /// Build a [`PixmillError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PixmillError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`PixmillError::Consistency`] value.
    pub fn consistency(msg: impl Into<String>) -> Self {
        Self::Consistency(msg.into())
    }

    /// Build a [`PixmillError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
