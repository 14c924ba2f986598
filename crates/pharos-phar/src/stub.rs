//! Stub handling.
//!
//! The stub is the opaque bootstrap text at the front of an archive. It
//! always ends with the canonical terminator, and the terminator occurs in
//! it exactly once; [`normalize`] enforces that invariant for any
//! caller-supplied text.

use pharos_common::memchr::memmem;

use crate::format::{HALT_TOKEN, STUB_TERMINATOR};
use crate::{Error, Result};

/// Find the end of the stub in `data`: the position immediately after the
/// first occurrence of the canonical terminator.
pub(crate) fn find_stub_end(data: &[u8]) -> Option<usize> {
    memmem::find(data, STUB_TERMINATOR).map(|pos| pos + STUB_TERMINATOR.len())
}

/// Normalize caller-supplied stub text.
///
/// Everything from the first case-insensitive `__halt_compiler();` token
/// onward is replaced by the canonical terminator. Input without the token
/// is rejected with [`Error::InvalidStub`].
pub(crate) fn normalize(stub: &[u8]) -> Result<Vec<u8>> {
    let pos = find_halt_token(stub).ok_or(Error::InvalidStub)?;
    let mut out = Vec::with_capacity(pos + STUB_TERMINATOR.len());
    out.extend_from_slice(&stub[..pos]);
    out.extend_from_slice(STUB_TERMINATOR);
    Ok(out)
}

/// Position of the first case-insensitive halt-compiler token.
fn find_halt_token(stub: &[u8]) -> Option<usize> {
    stub.windows(HALT_TOKEN.len())
        .position(|window| window.eq_ignore_ascii_case(HALT_TOKEN))
}
