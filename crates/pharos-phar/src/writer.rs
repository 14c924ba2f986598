//! Serializing Phar archives to bytes.

use pharos_common::ByteWriter;

use crate::archive::PharArchive;
use crate::format::MAGIC;
use crate::{Error, Result};

impl PharArchive {
    /// Serialize the archive to its on-disk byte form.
    ///
    /// The output is deterministic for a given archive: entries are
    /// written in archive order, the manifest is framed with its length,
    /// and the digest for the configured signature kind is computed over
    /// every byte preceding it.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        if self.entries.is_empty() {
            return Err(Error::EmptyArchive);
        }

        // Manifest and payload region are assembled side by side so each
        // entry is walked (and compressed) exactly once.
        let mut manifest = ByteWriter::new();
        manifest.put_u32(self.entries.len() as u32);
        manifest.put_u16(self.manifest_api);
        manifest.put_u32(self.global_flags);
        manifest.put_len_prefixed(&self.alias);
        manifest.put_len_prefixed(&self.global_metadata);

        let mut payloads = ByteWriter::new();
        for entry in &self.entries {
            let compressed = entry.compressed_bytes()?;
            manifest.put_len_prefixed(entry.name().as_bytes());
            manifest.put_u32(entry.size() as u32);
            manifest.put_u32(entry.timestamp());
            manifest.put_u32(compressed.len() as u32);
            manifest.put_u32(entry.crc32());
            manifest.put_u32(entry.flags());
            manifest.put_len_prefixed(entry.metadata());
            payloads.put(&compressed);
        }

        let digest_len = self.signature.digest_len();
        let mut out = ByteWriter::with_capacity(
            self.stub.len() + 4 + manifest.len() + payloads.len() + digest_len + 8,
        );
        out.put(&self.stub);
        out.put_len_prefixed(manifest.as_slice());
        out.put(payloads.as_slice());

        // The digest covers everything written so far.
        let digest = self.signature.compute(out.as_slice());
        out.put(&digest);
        out.put_u32(self.signature as u32);
        out.put(MAGIC);

        Ok(out.into_bytes())
    }
}
