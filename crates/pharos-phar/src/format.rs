//! Phar wire-format constants and flag words.
//!
//! Everything multi-byte on disk is little-endian. The per-file flags word
//! packs Unix permission bits in the low 12 bits and the compression kind
//! in the 0xF000 nibble.

/// The fixed 4-octet end-of-file magic.
pub const MAGIC: &[u8; 4] = b"GBMB";

/// Canonical stub terminator; structured archive data begins right after it.
pub const STUB_TERMINATOR: &[u8] = b"__HALT_COMPILER(); ?>\r\n";

/// The halt-compiler token matched case-insensitively when normalizing a
/// stub.
pub const HALT_TOKEN: &[u8] = b"__halt_compiler();";

/// Minimal valid stub.
pub const DEFAULT_STUB: &[u8] = b"<?php __HALT_COMPILER(); ?>\r\n";

/// Default global manifest flags.
pub const DEFAULT_GLOBAL_FLAGS: u32 = 0x0001_0000;

/// Default manifest API version.
pub const DEFAULT_MANIFEST_API: u16 = 17;

/// Default per-entry Unix permission bits (rw-rw-rw-).
pub const DEFAULT_PERMISSION: u32 = 0o666;

/// Mask selecting the permission bits of a per-file flags word.
pub const PERMISSION_MASK: u32 = 0x0FFF;

/// Mask selecting the compression bits of a per-file flags word.
pub const COMPRESSION_MASK: u32 = 0xF000;

/// Per-entry compression kinds.
///
/// BZIP2 is a defined flag value but neither codec direction supports it;
/// it exists so the decoder can report it precisely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum Compression {
    /// No compression (stored).
    #[default]
    None = 0x0000,
    /// Raw DEFLATE compression.
    Gz = 0x1000,
    /// BZIP2 compression (recognized, never supported).
    Bzip2 = 0x2000,
}

impl Compression {
    /// The bits this kind contributes to the per-file flags word.
    #[inline]
    pub const fn flag_bits(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Compression {
    type Error = u32;

    /// Convert the masked compression bits of a flags word. The raw value
    /// is returned as the error for anything unrecognized.
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0x0000 => Ok(Self::None),
            0x1000 => Ok(Self::Gz),
            0x2000 => Ok(Self::Bzip2),
            other => Err(other),
        }
    }
}

/// Whole-archive signature kinds, as stored in the u32 word before the
/// magic trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum SignatureKind {
    /// MD5, 16-octet digest.
    Md5 = 0x01,
    /// SHA-1, 20-octet digest.
    #[default]
    Sha1 = 0x02,
    /// SHA-256, 32-octet digest.
    Sha256 = 0x04,
    /// SHA-512, 64-octet digest.
    Sha512 = 0x08,
}

impl SignatureKind {
    /// Length in octets of the raw digest this kind produces.
    #[inline]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }
}

impl TryFrom<u32> for SignatureKind {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::Md5),
            0x02 => Ok(Self::Sha1),
            0x04 => Ok(Self::Sha256),
            0x08 => Ok(Self::Sha512),
            other => Err(other),
        }
    }
}
