//! Resource-to-WARC conversion.
//!
//! A [`Converter`] resolves an input target into resources, maps each to a
//! target URI ([`UrlMapper`]), picks its content type ([`MimeResolver`]),
//! deduplicates identical payloads into revisits ([`DedupTable`]) and appends
//! the records to a WARC file.
//!
//! ```no_run
//! use warcit_config::Config;
//! use warcit_convert::Converter;
//!
//! let result = Converter::new(Config::default()).run("http://www.iana.org/", "www.iana.org").unwrap();
//! println!("Wrote {} resources to {}", result.written, result.output.display());
//! ```

pub mod dedup;
pub mod error;
pub mod mime;
mod run;
mod url;

pub use crate::dedup::{DedupTable, DigestEntry, RecordDecision};
pub use crate::mime::{MagicSniffer, MimeResolver, Sniffer};
pub use crate::run::{Converter, RunResult};
pub use crate::url::UrlMapper;
