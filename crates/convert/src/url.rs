//! Relative path to target URI mapping.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Escaped in a path segment: everything except RFC 3986 unreserved
/// characters, the sub-delimiters, `:` and `@`.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b':')
    .remove(b'@');

/// Maps `/`-separated relative paths under a URL prefix.
#[derive(Clone, Debug)]
pub struct UrlMapper {
    prefix: String,
    index_files: Vec<String>,
}
impl UrlMapper {
    /// A `/` is appended to `prefix` if missing. An empty `index_files`
    /// disables directory aliasing.
    pub fn new(prefix: &str, index_files: &[String]) -> Self {
        let mut prefix = prefix.to_string();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self {
            prefix,
            index_files: index_files.iter().filter(|name| !name.is_empty()).cloned().collect(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Target URI for a resource's relative path.
    ///
    /// ```
    /// use warcit_convert::UrlMapper;
    ///
    /// let mapper = UrlMapper::new("http://www.iana.org", &[]);
    /// assert_eq!(mapper.map("about/my page.html"), "http://www.iana.org/about/my%20page.html");
    /// ```
    pub fn map(&self, relative_path: &str) -> String {
        let mut uri = self.prefix.clone();
        for (i, segment) in relative_path.split('/').enumerate() {
            if i > 0 {
                uri.push('/');
            }
            uri.extend(utf8_percent_encode(segment, SEGMENT));
        }
        uri
    }

    /// The parent directory's URI (with trailing `/`) when the base name is
    /// one of the configured index files.
    pub fn alias(&self, relative_path: &str) -> Option<String> {
        let (parent, base) = match relative_path.rsplit_once('/') {
            Some((parent, base)) => (Some(parent), base),
            None => (None, relative_path),
        };
        if !self.index_files.iter().any(|name| name == base) {
            return None;
        }
        Some(match parent {
            Some(parent) => format!("{}/", self.map(parent)),
            None => self.prefix.clone(),
        })
    }
}
