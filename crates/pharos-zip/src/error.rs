//! Error types for the ZIP bridge.

use thiserror::Error;

/// Errors that can occur when converting between Phar and ZIP.
#[derive(Debug, Error)]
pub enum Error {
    /// ZIP container error.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Phar codec error.
    #[error("{0}")]
    Phar(#[from] pharos_phar::Error),
}

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;
