//! Input target resolution.

use crate::SourceHandle;
use crate::backend::{FsSource, ZipSource};
use crate::error::{ErrorKind, Result};
use crate::path::to_relative;
use exn::ResultExt;
use std::path::Path;
use tracing::instrument;

fn is_zip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

/// Resolve an input target string into a resource source.
///
/// In order:
/// 1. an existing directory enumerates every file below it;
/// 2. an existing regular file is a zip archive (by `.zip` extension) or a
///    single resource (an archive path may carry trailing separators);
/// 3. otherwise the nearest existing ancestor must be a zip archive, and the
///    remainder of the input becomes an internal path prefix
///    (`crawl.zip/www.iana.org/`).
///
/// # Errors
///
/// Returns [`InvalidInputPath`](ErrorKind::InvalidInputPath), carrying the
/// input string, when none of the above applies.
#[instrument]
pub fn resolve(input: &str) -> Result<SourceHandle> {
    let invalid = || ErrorKind::InvalidInputPath(input.to_string());
    let path = Path::new(input);
    if path.is_dir() {
        return Ok(Box::new(FsSource::directory(path).or_raise(invalid)?));
    }
    if path.is_file() {
        if is_zip(path) {
            return Ok(Box::new(ZipSource::open(path, None).or_raise(invalid)?));
        }
        return Ok(Box::new(FsSource::file(path).or_raise(invalid)?));
    }
    // `crawl.zip/` names the whole archive.
    let trimmed = Path::new(input.trim_end_matches(['/', '\\']));
    if trimmed.as_os_str().len() < path.as_os_str().len() && trimmed.is_file() && is_zip(trimmed) {
        return Ok(Box::new(ZipSource::open(trimmed, None).or_raise(invalid)?));
    }

    for ancestor in path.ancestors().skip(1) {
        if ancestor.as_os_str().is_empty() || ancestor.is_dir() {
            // Reached something that exists but cannot contain the remainder.
            break;
        }
        if ancestor.is_file() {
            let Ok(remainder) = path.strip_prefix(ancestor) else {
                break;
            };
            let prefix = to_relative(remainder);
            tracing::debug!(archive = %ancestor.display(), prefix = %prefix, "Resolved input inside archive");
            return Ok(Box::new(ZipSource::open(ancestor, Some(&prefix)).or_raise(invalid)?));
        }
    }
    exn::bail!(invalid())
}
