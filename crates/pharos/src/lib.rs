//! Pharos - Phar archive reading and writing library.
//!
//! This crate provides a unified interface to the Pharos crate family for
//! working with Phar archives.
//!
//! # Crates
//!
//! - [`pharos_common`] - Common utilities (byte cursors, CRC-32)
//! - [`pharos_phar`] - The Phar archive codec (model, parser, writer)
//! - [`pharos_zip`] - Lossy Phar <-> ZIP conversion
//!
//! # Example
//!
//! ```
//! use pharos::prelude::*;
//!
//! // Build an archive in memory
//! let mut archive = PharArchive::new();
//! archive.add_file(PharEntry::new("src/main.php", b"<?php run();".to_vec()));
//!
//! // Serialize and parse it back
//! let bytes = archive.to_bytes()?;
//! let parsed = PharArchive::parse(&bytes)?;
//! assert_eq!(parsed.file("src/main.php").unwrap().payload(), b"<?php run();");
//! # Ok::<(), pharos_phar::Error>(())
//! ```

// Re-export all sub-crates
pub use pharos_common as common;
pub use pharos_phar as phar;
pub use pharos_zip as zip;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use pharos_common::{crc32, ByteReader, ByteWriter};
    pub use pharos_phar::{
        Compression, PharArchive, PharEntry, PharOptions, SignatureKind,
    };
    pub use pharos_zip::{to_phar, to_zip};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
