//! A single file within a Phar archive.

use std::time::{SystemTime, UNIX_EPOCH};

use pharos_common::crc32;

use crate::compress;
use crate::format::{Compression, DEFAULT_PERMISSION, PERMISSION_MASK};
use crate::{Error, Result};

/// An entry (file) within a Phar archive.
///
/// The payload is held uncompressed; the on-disk compressed form is
/// derived on demand from the current compression kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PharEntry {
    /// Local path within the archive; the entry's identity.
    name: String,
    /// Uncompressed file contents.
    payload: Vec<u8>,
    /// Compression kind applied on serialization.
    compression: Compression,
    /// Unix permission bits (low 12 bits of the flags word).
    permission: u32,
    /// Unix timestamp of last modification.
    timestamp: u32,
    /// Opaque per-entry metadata blob.
    metadata: Vec<u8>,
}

impl PharEntry {
    /// Create a new entry with default attributes: stored uncompressed,
    /// permission `0o666`, timestamp now, empty metadata.
    pub fn new(name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
            compression: Compression::None,
            permission: DEFAULT_PERMISSION,
            timestamp: unix_now(),
            metadata: Vec::new(),
        }
    }

    /// Construct an entry from decoded manifest fields.
    pub(crate) fn from_parts(
        name: String,
        payload: Vec<u8>,
        compression: Compression,
        permission: u32,
        timestamp: u32,
        metadata: Vec<u8>,
    ) -> Self {
        Self {
            name,
            payload,
            compression,
            permission,
            timestamp,
            metadata,
        }
    }

    /// Get the entry name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the entry name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the uncompressed payload.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Replace the payload.
    pub fn set_payload(&mut self, payload: impl Into<Vec<u8>>) {
        self.payload = payload.into();
    }

    /// Get the compression kind.
    #[inline]
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Set the compression kind used on serialization.
    ///
    /// Only [`Compression::None`] and [`Compression::Gz`] can be written;
    /// anything else is refused with [`Error::UnsupportedCompression`].
    pub fn set_compression(&mut self, compression: Compression) -> Result<()> {
        match compression {
            Compression::None | Compression::Gz => {
                self.compression = compression;
                Ok(())
            }
            Compression::Bzip2 => Err(Error::UnsupportedCompression(compression.flag_bits())),
        }
    }

    /// Get the Unix permission bits.
    #[inline]
    pub fn permission(&self) -> u32 {
        self.permission
    }

    /// Set the Unix permission bits. Values above `0o7777` are rejected.
    pub fn set_permission(&mut self, permission: u32) -> Result<()> {
        if permission > PERMISSION_MASK {
            return Err(Error::PermissionOutOfRange(permission));
        }
        self.permission = permission;
        Ok(())
    }

    /// Get the Unix timestamp.
    #[inline]
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// Set the Unix timestamp. Negative input is replaced by the current
    /// wall-clock second; values past u32 range saturate.
    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = if timestamp < 0 {
            unix_now()
        } else {
            u32::try_from(timestamp).unwrap_or(u32::MAX)
        };
    }

    /// Get the per-entry metadata blob.
    #[inline]
    pub fn metadata(&self) -> &[u8] {
        &self.metadata
    }

    /// Replace the per-entry metadata blob.
    pub fn set_metadata(&mut self, metadata: impl Into<Vec<u8>>) {
        self.metadata = metadata.into();
    }

    /// Uncompressed payload size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    /// The payload bytes as they appear on disk for the current
    /// compression kind, computed on demand.
    pub fn compressed_bytes(&self) -> Result<Vec<u8>> {
        match self.compression {
            Compression::None => Ok(self.payload.clone()),
            Compression::Gz => compress::deflate_raw(&self.payload),
            Compression::Bzip2 => Err(Error::UnsupportedCompression(self.compression.flag_bits())),
        }
    }

    /// Size of the on-disk payload bytes.
    pub fn compressed_size(&self) -> Result<usize> {
        Ok(self.compressed_bytes()?.len())
    }

    /// CRC-32 of the uncompressed payload.
    #[inline]
    pub fn crc32(&self) -> u32 {
        crc32::hash(&self.payload)
    }

    /// The per-file flags word written in the manifest: permission bits in
    /// the low 12 bits, compression bits in the 0xF000 nibble.
    #[inline]
    pub fn flags(&self) -> u32 {
        (self.permission & PERMISSION_MASK) | self.compression.flag_bits()
    }
}

/// Current wall-clock time as Unix seconds.
pub(crate) fn unix_now() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}
