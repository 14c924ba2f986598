//! Error types for the Phar codec.

use thiserror::Error;

/// Errors that can occur when working with Phar archives.
#[derive(Debug, Error)]
pub enum Error {
    /// The buffer does not end in the GBMB magic trailer.
    #[error("missing GBMB magic trailer")]
    MagicMismatch,

    /// The signature-kind word is not one of the four accepted values.
    #[error("unknown signature kind: {0:#06x}")]
    UnknownSignature(u32),

    /// The whole-archive digest does not verify.
    #[error("archive signature does not verify")]
    SignatureInvalid,

    /// The stub terminator was not found before the manifest.
    #[error("stub terminator `__HALT_COMPILER(); ?>` not found")]
    StubNotFound,

    /// The declared manifest length exceeds the remaining bytes.
    #[error("manifest length {declared} exceeds remaining {available} bytes")]
    TruncatedManifest { declared: usize, available: usize },

    /// Per-file CRC mismatch after decompression.
    #[error("file `{name}` is corrupt: crc32 mismatch")]
    FileCorrupt { name: String },

    /// An entry declares or requests an unsupported compression kind.
    #[error("unsupported compression flags: {0:#06x}")]
    UnsupportedCompression(u32),

    /// The DEFLATE engine failed while compressing.
    #[error("compression error: {0}")]
    Compression(String),

    /// The INFLATE engine failed while decompressing.
    #[error("decompression error: {0}")]
    Decompression(String),

    /// A stub was set without a `__halt_compiler();` token.
    #[error("stub does not contain a `__halt_compiler();` token")]
    InvalidStub,

    /// Permission bits outside 0..=0o7777.
    #[error("permission {0:#o} out of range (max 0o7777)")]
    PermissionOutOfRange(u32),

    /// Encode was called on an archive with no entries.
    #[error("cannot encode an archive with no entries")]
    EmptyArchive,

    /// Cursor read past the end of a buffer.
    #[error("{0}")]
    Common(#[from] pharos_common::Error),
}

/// Result type for Phar operations.
pub type Result<T> = std::result::Result<T, Error>;
