//! Local filesystem resource source.
//!
//! Covers both a directory tree (every regular file below the root) and a
//! single regular file (one resource named after the file).

use crate::backend::{ResourceSource, sort_resources};
use crate::error::{ErrorKind, Result};
use crate::{Origin, Resource, path::to_relative};
use exn::ResultExt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use walkdir::{DirEntry, WalkDir};

enum WalkEntry {
    File(Resource),
    Skip,
}

/// Filesystem resource source.
///
/// # Examples
///
/// ```no_run
/// use warcit_source::{ResourceSource, backend::FsSource};
///
/// # fn example() -> warcit_source::error::Result<()> {
/// let mut site = FsSource::directory("/srv/www.iana.org")?;
/// for resource in site.list()? {
///     println!("{} ({} bytes)", resource.relative_path, resource.size);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct FsSource {
    name: String,
    root: PathBuf,
    single_file: bool,
}
impl FsSource {
    /// Enumerate every regular file below `root`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPath`](ErrorKind::InvalidPath) if `root` is not a
    /// directory.
    pub fn directory(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        Ok(Self {
            name: root.display().to_string(),
            root,
            single_file: false,
        })
    }

    /// Enumerate exactly one regular file, whose relative path is its file
    /// name.
    pub fn file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() || path.file_name().is_none() {
            exn::bail!(ErrorKind::InvalidPath(path));
        }
        Ok(Self {
            name: path.display().to_string(),
            root: path,
            single_file: true,
        })
    }

    fn resource(path: &Path, relative_path: String, metadata: &Metadata) -> Result<Resource> {
        let modified = metadata.modified().map_err(|e| ErrorKind::from_io(e, path))?;
        Ok(Resource {
            relative_path,
            source_path: path.display().to_string(),
            size: metadata.len(),
            modified: OffsetDateTime::from(modified),
            origin: Origin::Filesystem { path: path.to_path_buf() },
        })
    }

    fn process_entry(&self, entry: DirEntry) -> Result<WalkEntry> {
        // Symlinks are followed, so anything that is still not a regular file
        // (directories, sockets, broken links) is not a resource.
        if !entry.file_type().is_file() {
            return Ok(WalkEntry::Skip);
        }
        let path = entry.path();
        let relative = path.strip_prefix(&self.root).or_raise(|| ErrorKind::InvalidPath(path.to_path_buf()))?;
        let metadata = entry.metadata().map_err(|e| ErrorKind::from_io(e.into(), path))?;
        Ok(WalkEntry::File(Self::resource(path, to_relative(relative), &metadata)?))
    }
}

impl ResourceSource for FsSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn list(&mut self) -> Result<Vec<Resource>> {
        if self.single_file {
            let metadata = std::fs::metadata(&self.root).map_err(|e| ErrorKind::from_io(e, &self.root))?;
            let name = self.root.file_name().map(to_relative).unwrap_or_default();
            return Ok(vec![Self::resource(&self.root, name, &metadata)?]);
        }

        let mut resources = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                    exn::bail!(ErrorKind::from_io(err.into(), path));
                },
            };
            match self.process_entry(entry)? {
                WalkEntry::File(resource) => resources.push(resource),
                WalkEntry::Skip => {},
            }
        }
        sort_resources(&mut resources);
        tracing::debug!(source = %self.name, count = resources.len(), "Listed directory");
        Ok(resources)
    }

    fn read(&mut self, resource: &Resource) -> Result<Vec<u8>> {
        let Origin::Filesystem { path } = &resource.origin else {
            exn::bail!(ErrorKind::InvalidPath(resource.source_path.clone().into()));
        };
        Ok(std::fs::read(path).map_err(|e| ErrorKind::from_io(e, path))?)
    }
}
