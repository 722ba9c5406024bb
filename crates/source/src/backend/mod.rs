//! Resource source trait and implementations.
//!
//! Sources differ in where bytes come from (a directory tree, one file, a zip
//! archive), but all of them enumerate in the same deterministic order and
//! defer reading content until asked.

mod archive;
mod fs;

pub use self::archive::ZipSource;
pub use self::fs::FsSource;
use crate::Resource;
use crate::error::Result;

/// Unified interface for resource enumeration.
///
/// # Ordering
/// [`list()`](Self::list) returns resources sorted ascending by
/// [`relative_path`](Resource::relative_path), so that two runs over the same
/// input produce records in the same order.
///
/// # Laziness
/// Listing only touches metadata. Content is read by
/// [`read()`](Self::read), which callers are expected to invoke once per
/// resource.
///
/// # Examples
///
/// ```no_run
/// use warcit_source::{ResourceSource, resolve, error::Result};
///
/// fn total_size(input: &str) -> Result<u64> {
///     let mut source = resolve(input)?;
///     let mut total = 0;
///     for resource in source.list()? {
///         total += source.read(&resource)?.len() as u64;
///     }
///     Ok(total)
/// }
/// ```
pub trait ResourceSource {
    /// Short description of the source for logging (the root path or the
    /// archive path).
    fn name(&self) -> &str;

    /// Enumerate every resource, ordered by relative path.
    fn list(&mut self) -> Result<Vec<Resource>>;

    /// Read the full content of a resource previously returned by
    /// [`list()`](Self::list).
    fn read(&mut self, resource: &Resource) -> Result<Vec<u8>>;
}

pub(crate) fn sort_resources(resources: &mut [Resource]) {
    resources.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
}
