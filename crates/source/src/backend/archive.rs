//! Zip archive resource source.
//!
//! Entries are enumerated from the central directory, optionally narrowed to
//! an internal path prefix. Entry timestamps are DOS times without a zone and
//! are taken to be UTC.

use crate::backend::{ResourceSource, sort_resources};
use crate::error::{ErrorKind, Result};
use crate::{Origin, Resource, path::validate as validate_path};
use exn::ResultExt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};
use zip::ZipArchive;

/// Zip archive resource source.
///
/// # Examples
///
/// ```no_run
/// use warcit_source::{ResourceSource, backend::ZipSource};
///
/// # fn example() -> warcit_source::error::Result<()> {
/// // Only entries below `www.iana.org/`, relative to that directory.
/// let mut site = ZipSource::open("crawl.zip", Some("www.iana.org/"))?;
/// let resources = site.list()?;
/// # Ok(())
/// # }
/// ```
pub struct ZipSource {
    name: String,
    path: PathBuf,
    prefix: Option<String>,
    archive: ZipArchive<BufReader<File>>,
}
impl ZipSource {
    /// Open the archive at `path`, keeping only the entries at or below
    /// `prefix` (if given).
    ///
    /// A prefix that matches no entries is not an error; the source simply
    /// enumerates nothing.
    pub fn open(path: impl AsRef<Path>, prefix: Option<&str>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| ErrorKind::from_io(e, &path))?;
        let archive = ZipArchive::new(BufReader::new(file))
            .or_raise(|| ErrorKind::Archive(format!("cannot open {}", path.display())))?;
        let prefix = match prefix.map(str::trim).filter(|p| !p.trim_matches(['/', '\\']).is_empty()) {
            Some(p) => Some(validate_path(p)?),
            None => None,
        };
        Ok(Self {
            name: path.display().to_string(),
            path,
            prefix,
            archive,
        })
    }

    /// Relative path of an entry with respect to the configured prefix, or
    /// `None` if the entry lies outside of it.
    fn relative_to_prefix(&self, name: String) -> Option<String> {
        let Some(prefix) = &self.prefix else {
            return Some(name);
        };
        if name == *prefix {
            // The prefix names a single entry; address it by its base name.
            return name.rsplit('/').next().map(str::to_string);
        }
        name.strip_prefix(prefix.as_str()).and_then(|rest| rest.strip_prefix('/')).map(str::to_string)
    }

    fn entry_time(datetime: Option<zip::DateTime>) -> OffsetDateTime {
        let converted = datetime.and_then(|dt| {
            let month = Month::try_from(dt.month()).ok()?;
            let date = Date::from_calendar_date(i32::from(dt.year()), month, dt.day()).ok()?;
            let time = Time::from_hms(dt.hour(), dt.minute(), dt.second()).ok()?;
            Some(PrimitiveDateTime::new(date, time).assume_utc())
        });
        converted.unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

impl ResourceSource for ZipSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn list(&mut self) -> Result<Vec<Resource>> {
        let mut resources = Vec::new();
        for index in 0..self.archive.len() {
            let entry = self
                .archive
                .by_index(index)
                .or_raise(|| ErrorKind::Archive(format!("unreadable entry #{index} in {}", self.name)))?;
            if entry.is_dir() {
                continue;
            }
            let name = match validate_path(entry.name()) {
                Ok(name) => name,
                Err(err) => {
                    tracing::warn!(archive = %self.name, entry = entry.name(), "Skipping entry: {err}");
                    continue;
                },
            };
            let (size, modified) = (entry.size(), Self::entry_time(entry.last_modified()));
            drop(entry);
            let Some(relative_path) = self.relative_to_prefix(name.clone()) else {
                continue;
            };
            resources.push(Resource {
                relative_path,
                source_path: format!("{}/{}", self.path.display(), name),
                size,
                modified,
                origin: Origin::ZipEntry { index },
            });
        }
        sort_resources(&mut resources);
        tracing::debug!(
            source = %self.name,
            prefix = self.prefix.as_deref().unwrap_or(""),
            count = resources.len(),
            "Listed archive"
        );
        Ok(resources)
    }

    fn read(&mut self, resource: &Resource) -> Result<Vec<u8>> {
        let Origin::ZipEntry { index } = resource.origin else {
            exn::bail!(ErrorKind::InvalidPath(resource.source_path.clone().into()));
        };
        let mut entry = self
            .archive
            .by_index(index)
            .or_raise(|| ErrorKind::Archive(format!("unreadable entry {}", resource.source_path)))?;
        let mut buffer = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or_default());
        entry
            .read_to_end(&mut buffer)
            .or_raise(|| ErrorKind::Archive(format!("corrupt entry {}", resource.source_path)))?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::build_archive;

    fn site(dir: &Path) -> PathBuf {
        let path = dir.join("site.zip");
        build_archive(&path, &[
            ("www.iana.org/", b""),
            ("www.iana.org/index.html", b"<html>home</html>"),
            ("www.iana.org/about/index.html", b"<html>about</html>"),
            ("www.iana.org/_css/screen.css", b"body {}"),
            ("other.org/index.html", b"<html>other</html>"),
        ]);
        path
    }

    #[test]
    fn test_list_whole_archive() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut source = ZipSource::open(site(temp_dir.path()), None).unwrap();
        let paths: Vec<_> = source.list().unwrap().into_iter().map(|r| r.relative_path).collect();
        assert_eq!(paths, vec![
            "other.org/index.html",
            "www.iana.org/_css/screen.css",
            "www.iana.org/about/index.html",
            "www.iana.org/index.html",
        ]);
    }

    #[test]
    fn test_list_with_prefix() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut source = ZipSource::open(site(temp_dir.path()), Some("www.iana.org/")).unwrap();
        let resources = source.list().unwrap();
        let paths: Vec<_> = resources.iter().map(|r| r.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["_css/screen.css", "about/index.html", "index.html"]);
        let index = &resources[2];
        assert!(index.source_path.ends_with("site.zip/www.iana.org/index.html"));
        assert_eq!(source.read(index).unwrap(), b"<html>home</html>");
    }

    #[test]
    fn test_prefix_is_component_based() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut source = ZipSource::open(site(temp_dir.path()), Some("www.iana")).unwrap();
        assert!(source.list().unwrap().is_empty());
    }

    #[test]
    fn test_missing_prefix_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut source = ZipSource::open(site(temp_dir.path()), Some("www.example.com/")).unwrap();
        assert!(source.list().unwrap().is_empty());
    }

    #[test]
    fn test_prefix_naming_a_single_entry() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut source = ZipSource::open(site(temp_dir.path()), Some("www.iana.org/about/index.html")).unwrap();
        let resources = source.list().unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].relative_path, "index.html");
    }

    #[test]
    fn test_entry_timestamps_are_utc() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut source = ZipSource::open(site(temp_dir.path()), None).unwrap();
        let resource = source.list().unwrap().remove(0);
        let expected = PrimitiveDateTime::new(
            Date::from_calendar_date(2017, Month::October, 17).unwrap(),
            Time::from_hms(14, 30, 26).unwrap(),
        )
        .assume_utc();
        assert_eq!(resource.modified, expected);
    }

    #[test]
    fn test_not_an_archive() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("fake.zip");
        std::fs::write(&path, b"definitely not a zip").unwrap();
        let err = ZipSource::open(&path, None).err().unwrap();
        assert!(matches!(&*err, ErrorKind::Archive(_)));
    }
}
