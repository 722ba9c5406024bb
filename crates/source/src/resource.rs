//! Resource descriptors produced by a [`ResourceSource`](crate::ResourceSource).

use std::path::PathBuf;
use time::OffsetDateTime;

/// Where the bytes of a [`Resource`] live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// A regular file on the local filesystem.
    Filesystem { path: PathBuf },
    /// An entry of the zip archive the resource was enumerated from,
    /// addressed by its index in the central directory.
    ZipEntry { index: usize },
}

/// A single enumerated resource.
///
/// Immutable once enumerated. The content is not part of the descriptor; it
/// is fetched on demand through [`ResourceSource::read`](crate::ResourceSource::read).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// `/`-separated path relative to the source root
    pub relative_path: String,
    /// Fully qualified location, for diagnostics and pattern matching: the
    /// filesystem path, or `<archive>/<entry name>` for zip entries
    pub source_path: String,
    /// Uncompressed size in bytes
    pub size: u64,
    /// Last modification time, in UTC
    pub modified: OffsetDateTime,
    pub origin: Origin,
}
impl Resource {
    /// The final segment of the relative path.
    ///
    /// ```
    /// # use warcit_source::{Origin, Resource};
    /// # use time::OffsetDateTime;
    /// let resource = Resource {
    ///     relative_path: "about/index.html".into(),
    ///     source_path: "/srv/site/about/index.html".into(),
    ///     size: 0,
    ///     modified: OffsetDateTime::UNIX_EPOCH,
    ///     origin: Origin::ZipEntry { index: 0 },
    /// };
    /// assert_eq!(resource.base_name(), "index.html");
    /// ```
    pub fn base_name(&self) -> &str {
        self.relative_path.rsplit('/').next().unwrap_or(&self.relative_path)
    }
}
