//! Raw-DEFLATE adapters for per-entry payloads.
//!
//! Phar stores GZ-flagged payloads as a bare DEFLATE bitstream with no
//! zlib or gzip wrapper framing.

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::{Error, Result};

/// Compress data with raw DEFLATE.
pub fn deflate_raw(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| Error::Compression(e.to_string()))?;
    encoder.finish().map_err(|e| Error::Compression(e.to_string()))
}

/// Decompress raw DEFLATE data.
pub fn inflate_raw(data: &[u8]) -> Result<Vec<u8>> {
    inflate_raw_sized(data, 0)
}

/// Decompress raw DEFLATE data with an expected output size used as a
/// capacity hint (never as validation).
pub fn inflate_raw_sized(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    let mut decoder = DeflateDecoder::new(data);
    let mut output = Vec::with_capacity(expected_size);
    decoder
        .read_to_end(&mut output)
        .map_err(|e| Error::Decompression(e.to_string()))?;
    Ok(output)
}
