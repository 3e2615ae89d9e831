//! Common error types for gsort

use thiserror::Error;

/// Common result type for gsort operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across gsort crates
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading, validation or logging setup error
    #[error("Configuration error: {0}")]
    Config(String),
}
