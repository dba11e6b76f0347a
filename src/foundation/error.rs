/// Convenience result type used across spritegrid.
pub type SpriteGridResult<T> = Result<T, SpriteGridError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Enhancement paths (interpolation, APNG re-encoding) return errors that
/// callers are expected to log and swallow; only the primary content path
/// (image decoding) is surfaced to hosts.
#[derive(thiserror::Error, Debug)]
pub enum SpriteGridError {
    /// Invalid caller-provided geometry or sheet data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed or inconsistent animation metadata.
    #[error("metadata error: {0}")]
    Metadata(String),

    /// Errors while decoding source images.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors while encoding animated output.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpriteGridError {
    /// Build a [`SpriteGridError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpriteGridError::Metadata`] value.
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::Metadata(msg.into())
    }

    /// Build a [`SpriteGridError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SpriteGridError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
