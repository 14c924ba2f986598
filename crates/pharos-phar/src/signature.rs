//! Whole-archive signature computation and verification.
//!
//! The digest is computed over the raw archive bytes strictly preceding
//! it; verification compares raw digest octets, never a hex encoding.

use md5::{Digest, Md5};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::format::SignatureKind;

impl SignatureKind {
    /// Compute the raw digest of `data` for this signature kind.
    ///
    /// The returned buffer is [`digest_len`](Self::digest_len) octets long.
    pub fn compute(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Md5 => Md5::digest(data).to_vec(),
            Self::Sha1 => Sha1::digest(data).to_vec(),
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// Verify a candidate digest octet-for-octet.
    pub fn verify(self, data: &[u8], expected: &[u8]) -> bool {
        self.compute(data).as_slice() == expected
    }
}
