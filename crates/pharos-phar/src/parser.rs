//! Parsing Phar archives from bytes.

use pharos_common::{crc32, ByteReader};

use crate::archive::PharArchive;
use crate::compress;
use crate::entry::PharEntry;
use crate::format::{Compression, SignatureKind, COMPRESSION_MASK, MAGIC, PERMISSION_MASK};
use crate::stub;
use crate::{Error, Result};

impl PharArchive {
    /// Parse a Phar archive from bytes.
    ///
    /// Validation happens outside-in: the magic trailer and signature kind
    /// first, then the whole-archive digest over the signed region, and
    /// only then the stub, manifest framing, and per-file CRCs. A failure
    /// at any step returns an error without a partial archive.
    pub fn parse(data: &[u8]) -> Result<Self> {
        // Magic trailer.
        if data.len() < 8 || data[data.len() - 4..] != *MAGIC {
            return Err(Error::MagicMismatch);
        }

        // Signature kind word immediately precedes the magic.
        let kind_offset = data.len() - 8;
        let kind_word = u32::from_le_bytes([
            data[kind_offset],
            data[kind_offset + 1],
            data[kind_offset + 2],
            data[kind_offset + 3],
        ]);
        let signature = SignatureKind::try_from(kind_word).map_err(Error::UnknownSignature)?;

        // The digest sits before the kind word; everything before the
        // digest is the signed region.
        let trailer_len = 8 + signature.digest_len();
        if data.len() < trailer_len {
            return Err(Error::Common(pharos_common::Error::UnexpectedEof {
                needed: trailer_len,
                available: data.len(),
            }));
        }
        let signed_end = data.len() - trailer_len;
        let signed = &data[..signed_end];
        let expected_digest = &data[signed_end..signed_end + signature.digest_len()];

        if !signature.verify(signed, expected_digest) {
            return Err(Error::SignatureInvalid);
        }

        // The stub runs through the canonical terminator.
        let stub_end = stub::find_stub_end(signed).ok_or(Error::StubNotFound)?;
        let stub = signed[..stub_end].to_vec();

        // Manifest frame: u32 length, manifest bytes, then the payload
        // region holding every entry's compressed bytes in order.
        let mut cursor = ByteReader::new(&signed[stub_end..]);
        let manifest_len = cursor.read_u32()? as usize;
        if manifest_len > cursor.remaining() {
            return Err(Error::TruncatedManifest {
                declared: manifest_len,
                available: cursor.remaining(),
            });
        }
        let manifest_bytes = cursor.read_bytes(manifest_len)?;
        let mut payloads = ByteReader::new(cursor.take_remaining());

        // Manifest header.
        let mut manifest = ByteReader::new(manifest_bytes);
        let file_count = manifest.read_u32()?;
        let manifest_api = manifest.read_u16()?;
        let global_flags = manifest.read_u32()?;
        let alias = manifest.read_len_prefixed()?.to_vec();
        let global_metadata = manifest.read_len_prefixed()?.to_vec();

        let mut archive = PharArchive {
            stub,
            alias,
            global_flags,
            manifest_api,
            global_metadata,
            signature,
            entries: Vec::with_capacity(file_count as usize),
        };

        // File table, interleaved with sequential payload reads. Residual
        // payload bytes after the last entry are tolerated.
        for _ in 0..file_count {
            let entry = Self::parse_entry(&mut manifest, &mut payloads)?;
            archive.add_file(entry);
        }

        Ok(archive)
    }

    fn parse_entry(manifest: &mut ByteReader, payloads: &mut ByteReader) -> Result<PharEntry> {
        let name = String::from_utf8_lossy(manifest.read_len_prefixed()?).into_owned();
        // The uncompressed size is advisory; the CRC below is what
        // validates the payload. It still makes a good capacity hint.
        let uncompressed_size = manifest.read_u32()? as usize;
        let timestamp = manifest.read_u32()?;
        let compressed_size = manifest.read_u32()? as usize;
        let stored_crc = manifest.read_u32()?;
        let flags_word = manifest.read_u32()?;
        let metadata = manifest.read_len_prefixed()?.to_vec();

        let compressed = payloads.read_bytes(compressed_size)?;

        let compression = Compression::try_from(flags_word & COMPRESSION_MASK)
            .map_err(Error::UnsupportedCompression)?;
        let payload = match compression {
            Compression::None => compressed.to_vec(),
            Compression::Gz => compress::inflate_raw_sized(compressed, uncompressed_size)?,
            Compression::Bzip2 => {
                return Err(Error::UnsupportedCompression(compression.flag_bits()))
            }
        };

        if crc32::hash(&payload) != stored_crc {
            return Err(Error::FileCorrupt { name });
        }

        Ok(PharEntry::from_parts(
            name,
            payload,
            compression,
            flags_word & PERMISSION_MASK,
            timestamp,
            metadata,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharos_common::ByteWriter;

    use crate::format::DEFAULT_STUB;

    /// Append digest, kind word, and magic to a signed region.
    fn seal(body: Vec<u8>, kind: SignatureKind) -> Vec<u8> {
        let mut out = ByteWriter::with_capacity(body.len() + kind.digest_len() + 8);
        out.put(&body);
        out.put(&kind.compute(&body));
        out.put_u32(kind as u32);
        out.put(MAGIC);
        out.into_bytes()
    }

    /// A minimal signed region: stub, manifest header, one manifest entry,
    /// stored payload.
    fn one_file_body(name: &[u8], payload: &[u8], flags_word: u32, crc: u32) -> Vec<u8> {
        let mut manifest = ByteWriter::new();
        manifest.put_u32(1);
        manifest.put_u16(17);
        manifest.put_u32(0x0001_0000);
        manifest.put_len_prefixed(b"");
        manifest.put_len_prefixed(b"");
        manifest.put_len_prefixed(name);
        manifest.put_u32(payload.len() as u32);
        manifest.put_u32(0);
        manifest.put_u32(payload.len() as u32);
        manifest.put_u32(crc);
        manifest.put_u32(flags_word);
        manifest.put_len_prefixed(b"");

        let mut body = ByteWriter::new();
        body.put(DEFAULT_STUB);
        body.put_len_prefixed(manifest.as_slice());
        body.put(payload);
        body.into_bytes()
    }

    #[test]
    fn test_magic_mismatch() {
        assert!(matches!(PharArchive::parse(b""), Err(Error::MagicMismatch)));
        assert!(matches!(
            PharArchive::parse(b"GBMB"),
            Err(Error::MagicMismatch)
        ));
        assert!(matches!(
            PharArchive::parse(b"definitely not a phar"),
            Err(Error::MagicMismatch)
        ));
    }

    #[test]
    fn test_unknown_signature_kind() {
        let mut data = vec![0u8; 16];
        data[8..12].copy_from_slice(&0x40u32.to_le_bytes());
        data[12..].copy_from_slice(MAGIC);

        assert!(matches!(
            PharArchive::parse(&data),
            Err(Error::UnknownSignature(0x40))
        ));
    }

    #[test]
    fn test_signature_invalid() {
        let mut data = seal(
            one_file_body(b"a.txt", b"hi", 0o666, crc32::hash(b"hi")),
            SignatureKind::Sha1,
        );
        // Flip one bit inside the digest.
        let digest_start = data.len() - 8 - 20;
        data[digest_start] ^= 0x01;

        assert!(matches!(
            PharArchive::parse(&data),
            Err(Error::SignatureInvalid)
        ));
    }

    #[test]
    fn test_stub_terminator_missing() {
        let data = seal(b"<?php no terminator here".to_vec(), SignatureKind::Sha1);

        assert!(matches!(PharArchive::parse(&data), Err(Error::StubNotFound)));
    }

    #[test]
    fn test_truncated_manifest() {
        let mut body = ByteWriter::new();
        body.put(DEFAULT_STUB);
        body.put_u32(1000);
        let data = seal(body.into_bytes(), SignatureKind::Sha1);

        assert!(matches!(
            PharArchive::parse(&data),
            Err(Error::TruncatedManifest {
                declared: 1000,
                available: 0
            })
        ));
    }

    #[test]
    fn test_manifest_underrun_is_out_of_bounds() {
        // Declared manifest length fits, but the manifest itself ends
        // mid-header.
        let mut body = ByteWriter::new();
        body.put(DEFAULT_STUB);
        body.put_len_prefixed(&[0x01, 0x00]);
        let data = seal(body.into_bytes(), SignatureKind::Sha1);

        assert!(matches!(
            PharArchive::parse(&data),
            Err(Error::Common(pharos_common::Error::UnexpectedEof { .. }))
        ));
    }

    #[test]
    fn test_bzip2_entry_rejected() {
        let data = seal(
            one_file_body(b"a.txt", b"hi", 0o666 | 0x2000, crc32::hash(b"hi")),
            SignatureKind::Sha1,
        );

        assert!(matches!(
            PharArchive::parse(&data),
            Err(Error::UnsupportedCompression(0x2000))
        ));
    }

    #[test]
    fn test_unknown_compression_bits_rejected() {
        let data = seal(
            one_file_body(b"a.txt", b"hi", 0o666 | 0x4000, crc32::hash(b"hi")),
            SignatureKind::Sha1,
        );

        assert!(matches!(
            PharArchive::parse(&data),
            Err(Error::UnsupportedCompression(0x4000))
        ));
    }

    #[test]
    fn test_crc_mismatch_is_file_corrupt() {
        let data = seal(
            one_file_body(b"a.txt", b"hi", 0o666, 0xDEAD_BEEF),
            SignatureKind::Sha1,
        );

        match PharArchive::parse(&data) {
            Err(Error::FileCorrupt { name }) => assert_eq!(name, "a.txt"),
            other => panic!("expected FileCorrupt, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_payload_shorter_than_declared() {
        let mut manifest = ByteWriter::new();
        manifest.put_u32(1);
        manifest.put_u16(17);
        manifest.put_u32(0x0001_0000);
        manifest.put_len_prefixed(b"");
        manifest.put_len_prefixed(b"");
        manifest.put_len_prefixed(b"a.txt");
        manifest.put_u32(2);
        manifest.put_u32(0);
        manifest.put_u32(100); // compressed size larger than the region
        manifest.put_u32(crc32::hash(b"hi"));
        manifest.put_u32(0o666);
        manifest.put_len_prefixed(b"");

        let mut body = ByteWriter::new();
        body.put(DEFAULT_STUB);
        body.put_len_prefixed(manifest.as_slice());
        body.put(b"hi");
        let data = seal(body.into_bytes(), SignatureKind::Sha1);

        assert!(matches!(
            PharArchive::parse(&data),
            Err(Error::Common(pharos_common::Error::UnexpectedEof { .. }))
        ));
    }

    #[test]
    fn test_residual_payload_bytes_tolerated() {
        let mut body = one_file_body(b"a.txt", b"hi", 0o666, crc32::hash(b"hi"));
        body.extend_from_slice(b"trailing junk the manifest never claims");
        let data = seal(body, SignatureKind::Sha1);

        let archive = PharArchive::parse(&data).unwrap();
        assert_eq!(archive.file_count(), 1);
        assert_eq!(archive.file("a.txt").unwrap().payload(), b"hi");
    }

    #[test]
    fn test_zero_entries_parse() {
        let mut manifest = ByteWriter::new();
        manifest.put_u32(0);
        manifest.put_u16(17);
        manifest.put_u32(0x0001_0000);
        manifest.put_len_prefixed(b"");
        manifest.put_len_prefixed(b"");

        let mut body = ByteWriter::new();
        body.put(DEFAULT_STUB);
        body.put_len_prefixed(manifest.as_slice());
        let data = seal(body.into_bytes(), SignatureKind::Sha1);

        let archive = PharArchive::parse(&data).unwrap();
        assert_eq!(archive.file_count(), 0);
        // An empty archive cannot be re-encoded.
        assert!(matches!(archive.to_bytes(), Err(Error::EmptyArchive)));
    }

    #[test]
    fn test_duplicate_names_keep_last() {
        let mut manifest = ByteWriter::new();
        manifest.put_u32(2);
        manifest.put_u16(17);
        manifest.put_u32(0x0001_0000);
        manifest.put_len_prefixed(b"");
        manifest.put_len_prefixed(b"");
        for payload in [b"old".as_slice(), b"new".as_slice()] {
            manifest.put_len_prefixed(b"dup.txt");
            manifest.put_u32(payload.len() as u32);
            manifest.put_u32(0);
            manifest.put_u32(payload.len() as u32);
            manifest.put_u32(crc32::hash(payload));
            manifest.put_u32(0o666);
            manifest.put_len_prefixed(b"");
        }

        let mut body = ByteWriter::new();
        body.put(DEFAULT_STUB);
        body.put_len_prefixed(manifest.as_slice());
        body.put(b"old");
        body.put(b"new");
        let data = seal(body.into_bytes(), SignatureKind::Sha1);

        let archive = PharArchive::parse(&data).unwrap();
        assert_eq!(archive.file_count(), 1);
        assert_eq!(archive.file("dup.txt").unwrap().payload(), b"new");
    }

    #[test]
    fn test_manifest_fields_decoded() {
        let mut manifest = ByteWriter::new();
        manifest.put_u32(1);
        manifest.put_u16(16);
        manifest.put_u32(0x0002_0000);
        manifest.put_len_prefixed(b"app.phar");
        manifest.put_len_prefixed(b"global meta");
        manifest.put_len_prefixed(b"a.txt");
        manifest.put_u32(2);
        manifest.put_u32(1_717_243_200);
        manifest.put_u32(2);
        manifest.put_u32(crc32::hash(b"hi"));
        manifest.put_u32(0o755);
        manifest.put_len_prefixed(b"entry meta");

        let mut body = ByteWriter::new();
        body.put(DEFAULT_STUB);
        body.put_len_prefixed(manifest.as_slice());
        body.put(b"hi");
        let data = seal(body.into_bytes(), SignatureKind::Sha256);

        let archive = PharArchive::parse(&data).unwrap();
        assert_eq!(archive.manifest_api(), 16);
        assert_eq!(archive.global_flags(), 0x0002_0000);
        assert_eq!(archive.alias(), b"app.phar");
        assert_eq!(archive.global_metadata(), b"global meta");
        assert_eq!(archive.signature(), SignatureKind::Sha256);

        let entry = archive.file("a.txt").unwrap();
        assert_eq!(entry.timestamp(), 1_717_243_200);
        assert_eq!(entry.permission(), 0o755);
        assert_eq!(entry.metadata(), b"entry meta");
    }
}
