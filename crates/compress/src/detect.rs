//! Recognising compressed files, and naming them.

use crate::Compression;
use std::path::Path;

const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];

impl Compression {
    /// Guess from a file name: `site.warc.gz` is gzip, anything else is not.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let gzip = path.as_ref().extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
        Self::from(gzip)
    }

    /// Guess from the leading bytes of a file. Too few bytes to tell means
    /// uncompressed.
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Self {
        Self::from(bytes.starts_with(GZIP_MAGIC))
    }

    /// Whether `bytes` begin the way a file in this mode would, used to
    /// sanity-check an append target.
    #[must_use]
    pub fn check_magic_bytes(&self, bytes: &[u8]) -> bool {
        Self::from_magic_bytes(bytes) == *self
    }

    /// Suffix appended after `.warc`.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Compression::None => "",
            Compression::Gzip => ".gz",
        }
    }
}
