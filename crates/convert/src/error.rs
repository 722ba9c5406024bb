//! Conversion Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A conversion error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input target is not a directory, a file, or a path into a zip
    /// archive. Nothing was written.
    #[display("\"{_0}\" not a valid directory, file or zip archive path")]
    InvalidInputPath(#[error(not(source))] String),
    /// The output file exists and neither append nor overwrite was requested.
    #[display("output file \"{}\" already exists", _0.display())]
    OutputExists(#[error(not(source))] PathBuf),
    /// A configured value (mime override glob, fixed date) is unusable.
    #[display("invalid configuration: {_0}")]
    InvalidConfig(#[error(not(source))] String),
    /// A resource could not be enumerated or read.
    #[display("could not read from source")]
    Source,
    /// The output file could not be opened or written. It may now hold a
    /// truncated trailing record.
    #[display("could not write output")]
    Write,
}

impl ErrorKind {
    /// Whether the failure should fail the process. An unresolvable input is
    /// reported but does not.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::InvalidInputPath(_))
    }
}
