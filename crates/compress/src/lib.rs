//! Per-record compression for WARC output.
//!
//! A WARC file is allowed to be a plain concatenation of records, or a
//! concatenation of independently compressed units (gzip members), one per
//! record. This crate wraps [`flate2`] behind a small [`Compression`] enum,
//! providing:
//!
//! - **Format detection** from file extensions ([`Compression::from_path`]) or
//!   magic bytes ([`Compression::from_magic_bytes`])
//! - **Member compression** ([`Compression::compress_into`]), where every call
//!   produces one self-contained unit that can be appended after any other
//! - **Multi-member decoding** ([`Compression::decompress`]), which reads a
//!   whole concatenation back as one continuous byte stream
//!
//! Gzip members are written at the best compression level.

mod detect;
pub mod error;
mod member;

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A supported output compression mode.
///
/// Defaults to [`None`](Self::None) (uncompressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Uncompressed
    #[default]
    None,
    /// Gzip compression (.gz), one member per unit
    Gzip,
}

impl From<bool> for Compression {
    /// `true` selects gzip, the conventional WARC compression.
    fn from(enabled: bool) -> Self {
        if enabled { Compression::Gzip } else { Compression::None }
    }
}

impl Display for Compression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;

    #[test]
    fn compression_default() {
        assert_eq!(Compression::default(), Compression::None);
    }

    #[test]
    fn compression_from_flag() {
        assert_eq!(Compression::from(true), Compression::Gzip);
        assert_eq!(Compression::from(false), Compression::None);
    }

    #[test]
    fn compression_display() {
        assert_eq!(Compression::Gzip.to_string(), "gzip");
        assert_eq!(Compression::None.to_string(), "none");
    }
}
