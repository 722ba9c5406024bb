//! Command-line list syntaxes for rule-shaped settings.

use crate::error::{Error, ErrorKind, Result};
use exn::OptionExt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Force a mime type for every resource whose fully qualified source path
/// matches `glob`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeOverride {
    pub glob: String,
    pub mime: String,
}
impl MimeOverride {
    pub fn new(glob: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            glob: glob.into(),
            mime: mime.into(),
        }
    }
}

impl FromStr for MimeOverride {
    type Err = Error;
    /// Parses `GLOB=MIME`. The split is on the last `=`, so globs may contain
    /// `=` but mime types may not.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ErrorKind::InvalidMimeOverride(s.to_string());
        let (glob, mime) = s.rsplit_once('=').ok_or_raise(invalid)?;
        let (glob, mime) = (glob.trim(), mime.trim());
        if glob.is_empty() || mime.is_empty() {
            exn::bail!(invalid());
        }
        Ok(Self::new(glob, mime))
    }
}

/// Parse a comma-separated list of `GLOB=MIME` overrides, preserving order.
///
/// ```
/// use warcit_config::{MimeOverride, parse_overrides};
///
/// let rules = parse_overrides("*/index.html=custom/mime, *.txt=text/plain").unwrap();
/// assert_eq!(rules, vec![
///     MimeOverride::new("*/index.html", "custom/mime"),
///     MimeOverride::new("*.txt", "text/plain"),
/// ]);
/// ```
pub fn parse_overrides(list: &str) -> Result<Vec<MimeOverride>> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::parse)
        .collect()
}

/// Parse a comma-separated list of file names. An empty list is valid.
pub fn parse_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*/index.html=custom/mime", "*/index.html", "custom/mime")]
    #[case(" *.txt = text/plain ", "*.txt", "text/plain")]
    #[case("a=b=text/plain", "a=b", "text/plain")]
    fn test_parse_override(#[case] input: &str, #[case] glob: &str, #[case] mime: &str) {
        assert_eq!(input.parse::<MimeOverride>().unwrap(), MimeOverride::new(glob, mime));
    }

    #[rstest]
    #[case("*.txt")]
    #[case("=text/plain")]
    #[case("*.txt=")]
    fn test_parse_override_invalid(#[case] input: &str) {
        let err = input.parse::<MimeOverride>().unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidMimeOverride(input.to_string()));
    }

    #[test]
    fn test_parse_override_list_reports_bad_item() {
        let err = parse_overrides("*.txt=text/plain,broken").unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidMimeOverride("broken".to_string()));
    }

    #[rstest]
    #[case("", &[])]
    #[case("index.html", &["index.html"])]
    #[case("index.html, default.htm,", &["index.html", "default.htm"])]
    fn test_parse_names(#[case] input: &str, #[case] expected: &[&str]) {
        assert_eq!(parse_names(input), expected);
    }
}
