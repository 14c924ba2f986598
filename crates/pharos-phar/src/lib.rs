//! Phar archive reading and writing.
//!
//! A Phar file concatenates a bootstrap stub, a length-prefixed manifest
//! describing the embedded files, the per-file payloads (optionally
//! raw-DEFLATE compressed), and a trailing signature plus the fixed
//! `GBMB` end marker:
//!
//! - Stub text ending in `__HALT_COMPILER(); ?>\r\n`
//! - Manifest: file count, API version, global flags, alias, global
//!   metadata, then one record per file (name, sizes, timestamp, CRC-32,
//!   flags word, metadata)
//! - Payload region: each file's compressed bytes in manifest order
//! - Whole-archive digest (MD5/SHA-1/SHA-256/SHA-512), signature-kind
//!   word, magic
//!
//! Every multi-byte integer on disk is little-endian. Three independent
//! integrity checks must agree: the per-file CRC-32 over uncompressed
//! payloads, the whole-archive digest over everything preceding it, and
//! the magic trailer.
//!
//! # Example
//!
//! ```
//! use pharos_phar::{Compression, PharArchive, PharEntry};
//!
//! let mut archive = PharArchive::new();
//! let mut entry = PharEntry::new("src/hello.php", b"<?php echo 'hi';".to_vec());
//! entry.set_compression(Compression::Gz)?;
//! archive.add_file(entry);
//!
//! let bytes = archive.to_bytes()?;
//! let parsed = PharArchive::parse(&bytes)?;
//! assert_eq!(parsed.file_count(), 1);
//! # Ok::<(), pharos_phar::Error>(())
//! ```

mod archive;
mod entry;
mod error;
mod format;
mod parser;
mod signature;
mod stub;
mod writer;

pub mod compress;

pub use archive::{PharArchive, PharOptions};
pub use entry::PharEntry;
pub use error::{Error, Result};
pub use format::{
    Compression, SignatureKind, COMPRESSION_MASK, DEFAULT_GLOBAL_FLAGS, DEFAULT_MANIFEST_API,
    DEFAULT_PERMISSION, DEFAULT_STUB, MAGIC, PERMISSION_MASK, STUB_TERMINATOR,
};
