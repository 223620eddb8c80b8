use thiserror::Error;

/// Core error type for bramble manifest operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to compile pattern {pattern:?}: {source}")]
    PatternCompile {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
