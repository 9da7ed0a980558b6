/// Convenience result type used across the crate.
pub type HausResult<T> = Result<T, HausError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Frame-level failures during playback never surface through this type; they degrade to
/// skipped draws. Errors are reserved for invalid configuration and for the explicit IO
/// entry points (config files, single-frame decode, PNG export).
#[derive(thiserror::Error, Debug)]
pub enum HausError {
    /// Invalid user-provided configuration or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame resource could not be fetched or decoded.
    #[error("load error: {0}")]
    Load(String),

    /// A drawing surface could not be created or written.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HausError {
    /// Build a [`HausError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HausError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`HausError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HausError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
