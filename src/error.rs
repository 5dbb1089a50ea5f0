//! Error types for chimei.
//!
//! The error surface is deliberately small: expected degraded conditions
//! (a gazetteer miss, an unavailable tagger, an exhausted geocoding retry
//! budget) are represented as `Option`/empty results, never as errors.
//! Only configuration and gazetteer-integrity problems are fatal, and
//! those only at startup.

use thiserror::Error;

/// Result type for chimei operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chimei operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Gazetteer data failed integrity validation at load time.
    #[error("Gazetteer integrity error: {0}")]
    Gazetteer(String),

    /// Invalid pipeline configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A channel was driven with arguments it cannot honor.
    #[error("Channel error: {0}")]
    Channel(String),

    /// Invalid input provided to an API that has preconditions
    /// (e.g. an inverted span). Empty sentences are not an error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a gazetteer integrity error.
    pub fn gazetteer(msg: impl Into<String>) -> Self {
        Error::Gazetteer(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Error::Channel(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}
