/// Convenience result type used across texgen.
pub type TexgenResult<T> = Result<T, TexgenError>;

/// Top-level error taxonomy used by the texture operators and codecs.
#[derive(thiserror::Error, Debug)]
pub enum TexgenError {
    /// Invalid caller-provided parameters or texture shapes.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while encoding or decoding image files.
    #[error("codec error: {0}")]
    Codec(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TexgenError {
    /// Build a [`TexgenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TexgenError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
