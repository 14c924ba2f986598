//! Common utilities for Pharos.
//!
//! This crate provides foundational types used across the Pharos crates:
//!
//! - [`ByteReader`] - Zero-copy binary reading from byte slices
//! - [`ByteWriter`] - Append-only assembly of little-endian wire data
//! - [`crc32`] - CRC-32/IEEE hashing utilities

mod cursor;
mod error;

pub mod crc32;

pub use cursor::{ByteReader, ByteWriter};
pub use error::{Error, Result};

/// Re-export memchr for accelerated byte searching
pub use memchr;
