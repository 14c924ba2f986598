//! The in-memory Phar archive model.

use crate::entry::PharEntry;
use crate::format::{SignatureKind, DEFAULT_GLOBAL_FLAGS, DEFAULT_MANIFEST_API, DEFAULT_STUB};
use crate::stub;
use crate::Result;

/// Recognized options for constructing a [`PharArchive`].
///
/// Every field has a sensible default, so callers typically override only
/// what they need:
///
/// ```
/// use pharos_phar::{PharArchive, PharOptions, SignatureKind};
///
/// let archive = PharArchive::with_options(PharOptions {
///     alias: b"app.phar".to_vec(),
///     signature: SignatureKind::Sha256,
///     ..Default::default()
/// }).unwrap();
///
/// assert_eq!(archive.alias(), b"app.phar");
/// ```
#[derive(Debug, Clone)]
pub struct PharOptions {
    /// Stub text; must contain a `__halt_compiler();` token.
    pub stub: Vec<u8>,
    /// Archive alias, possibly empty.
    pub alias: Vec<u8>,
    /// Whole-archive signature kind.
    pub signature: SignatureKind,
    /// Opaque global metadata blob.
    pub global_metadata: Vec<u8>,
    /// Global manifest flags.
    pub global_flags: u32,
    /// Manifest API version.
    pub manifest_api: u16,
    /// Initial entries, added in order with the usual eviction contract.
    pub entries: Vec<PharEntry>,
}

impl Default for PharOptions {
    fn default() -> Self {
        Self {
            stub: DEFAULT_STUB.to_vec(),
            alias: Vec::new(),
            signature: SignatureKind::Sha1,
            global_metadata: Vec::new(),
            global_flags: DEFAULT_GLOBAL_FLAGS,
            manifest_api: DEFAULT_MANIFEST_API,
            entries: Vec::new(),
        }
    }
}

/// A Phar archive: stub, manifest header fields, and an ordered collection
/// of uniquely-named entries.
///
/// Entry order is significant: serialization writes entries in this order,
/// and parsing preserves manifest order. Name uniqueness is enforced by
/// [`add_file`](Self::add_file), which evicts any previous entry with the
/// same name before appending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PharArchive {
    pub(crate) stub: Vec<u8>,
    pub(crate) alias: Vec<u8>,
    pub(crate) global_flags: u32,
    pub(crate) manifest_api: u16,
    pub(crate) global_metadata: Vec<u8>,
    pub(crate) signature: SignatureKind,
    pub(crate) entries: Vec<PharEntry>,
}

impl PharArchive {
    /// Create an empty archive with default stub, SHA-1 signature, and
    /// default manifest fields.
    pub fn new() -> Self {
        Self {
            stub: DEFAULT_STUB.to_vec(),
            alias: Vec::new(),
            global_flags: DEFAULT_GLOBAL_FLAGS,
            manifest_api: DEFAULT_MANIFEST_API,
            global_metadata: Vec::new(),
            signature: SignatureKind::Sha1,
            entries: Vec::new(),
        }
    }

    /// Create an archive from explicit options.
    ///
    /// The stub is normalized (truncated at the halt-compiler token, then
    /// terminated canonically); entries are added through the eviction
    /// contract of [`add_file`](Self::add_file).
    pub fn with_options(options: PharOptions) -> Result<Self> {
        let mut archive = Self {
            stub: stub::normalize(&options.stub)?,
            alias: options.alias,
            global_flags: options.global_flags,
            manifest_api: options.manifest_api,
            global_metadata: options.global_metadata,
            signature: options.signature,
            entries: Vec::with_capacity(options.entries.len()),
        };
        for entry in options.entries {
            archive.add_file(entry);
        }
        Ok(archive)
    }

    /// Get the stub. Always ends with `__HALT_COMPILER(); ?>\r\n`.
    #[inline]
    pub fn stub(&self) -> &[u8] {
        &self.stub
    }

    /// Replace the stub.
    ///
    /// Everything from the case-insensitive `__halt_compiler();` token
    /// onward is replaced by the canonical terminator; input without the
    /// token is rejected with [`crate::Error::InvalidStub`].
    pub fn set_stub(&mut self, stub: impl AsRef<[u8]>) -> Result<()> {
        self.stub = stub::normalize(stub.as_ref())?;
        Ok(())
    }

    /// Get the archive alias.
    #[inline]
    pub fn alias(&self) -> &[u8] {
        &self.alias
    }

    /// Set the archive alias.
    pub fn set_alias(&mut self, alias: impl Into<Vec<u8>>) {
        self.alias = alias.into();
    }

    /// Get the global manifest flags.
    #[inline]
    pub fn global_flags(&self) -> u32 {
        self.global_flags
    }

    /// Set the global manifest flags.
    pub fn set_global_flags(&mut self, flags: u32) {
        self.global_flags = flags;
    }

    /// Get the manifest API version.
    #[inline]
    pub fn manifest_api(&self) -> u16 {
        self.manifest_api
    }

    /// Set the manifest API version.
    pub fn set_manifest_api(&mut self, api: u16) {
        self.manifest_api = api;
    }

    /// Get the global metadata blob.
    #[inline]
    pub fn global_metadata(&self) -> &[u8] {
        &self.global_metadata
    }

    /// Set the global metadata blob.
    pub fn set_global_metadata(&mut self, metadata: impl Into<Vec<u8>>) {
        self.global_metadata = metadata.into();
    }

    /// Get the signature kind.
    #[inline]
    pub fn signature(&self) -> SignatureKind {
        self.signature
    }

    /// Set the signature kind used when serializing.
    pub fn set_signature(&mut self, signature: SignatureKind) {
        self.signature = signature;
    }

    /// Add an entry, evicting any existing entry with the same name first.
    ///
    /// A replacement therefore becomes the last entry rather than updating
    /// in place.
    pub fn add_file(&mut self, entry: PharEntry) {
        self.entries.retain(|e| e.name() != entry.name());
        self.entries.push(entry);
    }

    /// Find an entry by name.
    pub fn file(&self, name: &str) -> Option<&PharEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// Find an entry by name, mutably.
    pub fn file_mut(&mut self, name: &str) -> Option<&mut PharEntry> {
        self.entries.iter_mut().find(|e| e.name() == name)
    }

    /// Remove an entry by name, returning it if present.
    pub fn remove_file(&mut self, name: &str) -> Option<PharEntry> {
        let index = self.entries.iter().position(|e| e.name() == name)?;
        Some(self.entries.remove(index))
    }

    /// The entries in archive order.
    #[inline]
    pub fn files(&self) -> &[PharEntry] {
        &self.entries
    }

    /// Replace all entries: clears the collection, then re-adds in order
    /// through the eviction contract.
    pub fn set_files(&mut self, entries: Vec<PharEntry>) {
        self.entries.clear();
        for entry in entries {
            self.add_file(entry);
        }
    }

    /// Number of entries.
    #[inline]
    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over entries in archive order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &PharEntry> {
        self.entries.iter()
    }
}

impl Default for PharArchive {
    fn default() -> Self {
        Self::new()
    }
}
