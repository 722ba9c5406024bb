//! Relative path normalization.
//!
//! Every resource is addressed by a `/`-separated path relative to the root of
//! its source, regardless of platform or origin. Zip entry names come from
//! untrusted archives, so they are validated before use.

use std::path::{Component, Path};

use crate::error::{ErrorKind, Result};

/// Validates an archive entry name and normalizes it into a relative path.
///
/// Backslashes are treated as separators (some archivers write them), `.`
/// segments and repeated slashes are dropped and `..` is resolved, but the
/// name may never climb above the archive root.
///
/// # Examples
///
/// ```
/// use warcit_source::validate_path;
/// assert_eq!(validate_path("www.iana.org/index.html").unwrap(), "www.iana.org/index.html");
/// assert_eq!(validate_path("a//./b/../c.css").unwrap(), "a/c.css");
/// assert!(validate_path("../etc/passwd").is_err());
/// assert!(validate_path("a\0b").is_err());
/// ```
pub fn validate(name: &str) -> Result<String> {
    let invalid = || ErrorKind::InvalidPath(name.into());
    let mut segments: Vec<&str> = Vec::new();
    for segment in name.split(['/', '\\']) {
        match segment {
            "" | "." => {},
            ".." => {
                if segments.pop().is_none() {
                    exn::bail!(invalid());
                }
            },
            // Null bytes would truncate the name in anything C-based.
            s if s.contains('\0') => exn::bail!(invalid()),
            // Drive letters have no place inside an archive.
            s if segments.is_empty() && s.len() == 2 && s.ends_with(':') => exn::bail!(invalid()),
            s => segments.push(s),
        }
    }
    if segments.is_empty() {
        exn::bail!(invalid());
    }
    Ok(segments.join("/"))
}

/// Join the normal components of a filesystem path with `/`.
///
/// Non-UTF-8 components are converted lossily; root, prefix and `.`
/// components are dropped.
pub fn to_relative(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .components()
        .filter_map(|component| match component {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("index.html", "index.html")]
    #[case("www.iana.org/about/index.html", "www.iana.org/about/index.html")]
    #[case("a//b//c", "a/b/c")]
    #[case("a/./b/./c", "a/b/c")]
    #[case("a/b/..", "a")]
    #[case("/leading/slash", "leading/slash")]
    #[case("windows\\style\\name.txt", "windows/style/name.txt")]
    #[case("dir/", "dir")]
    fn test_valid_names(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(validate(name).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("./")]
    #[case("//")]
    #[case("..")]
    #[case("../etc/passwd")]
    #[case("a/../../b")]
    #[case("a\0b")]
    #[case("C:/Windows/win.ini")]
    fn test_invalid_names(#[case] name: &str) {
        let err = validate(name).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }

    #[test]
    fn test_to_relative() {
        assert_eq!(to_relative(Path::new("about/index.html")), "about/index.html");
        assert_eq!(to_relative(Path::new("./about//logo.png")), "about/logo.png");
        assert_eq!(to_relative(Path::new("")), "");
    }
}
