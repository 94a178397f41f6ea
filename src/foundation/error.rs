/// Result alias used throughout the crate.
pub type FolioResult<T> = Result<T, FolioError>;

/// Error type for configuration, validation and file handling failures.
#[derive(thiserror::Error, Debug)]
pub enum FolioError {
    /// A value violated a documented invariant (step order, progress range, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// A loader configuration could not be accepted.
    #[error("config error: {0}")]
    Config(String),

    /// Reading or writing a file failed.
    #[error("io error: {context}")]
    Io {
        /// What was being done, e.g. `read 'index.html'`.
        context: String,
        /// Underlying error, kind preserved.
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FolioError {
    /// Build a [`FolioError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FolioError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`FolioError::Io`] wrapping `source`.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Build a [`FolioError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
