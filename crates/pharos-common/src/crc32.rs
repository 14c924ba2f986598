//! CRC-32 hashing utilities.
//!
//! CRC-32/IEEE (polynomial 0xEDB88320, reflected, initial value and final
//! XOR 0xFFFFFFFF) is the per-file checksum used by the Phar manifest.

/// Compute the CRC-32/IEEE hash of a byte slice.
///
/// Uses hardware acceleration when available.
#[inline]
pub fn hash(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Compute the CRC-32/IEEE hash of a byte slice with a seed value.
///
/// This continues a previous CRC computation.
#[inline]
pub fn hash_with_seed(data: &[u8], seed: u32) -> u32 {
    let mut hasher = crc32fast::Hasher::new_with_initial(seed);
    hasher.update(data);
    hasher.finalize()
}
