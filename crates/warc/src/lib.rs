//! WARC/1.0 records and their on-disk framing.
//!
//! Only the subset of the format needed to archive local files is modelled:
//! a leading `warcinfo` record, `resource` records for content, and
//! `revisit` records pointing back at earlier identical content.

pub mod date;
mod digest;
pub mod error;
mod id;
mod record;
mod writer;

pub use crate::digest::{PayloadDigest, Sha1Base32};
pub use crate::id::RecordId;
pub use crate::record::{RefersTo, WarcRecord};
pub use crate::writer::RecordWriter;

/// Version line that opens every record.
pub const WARC_VERSION: &str = "WARC/1.0";
