//! Content-type resolution: overrides, then sniffing, then extension.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use glob::Pattern;
use warcit_config::MimeOverride;
use warcit_source::Resource;

/// Number of leading payload bytes handed to a [`Sniffer`].
pub const SNIFF_LEN: usize = 512;
/// Returned when nothing else matched.
pub const DEFAULT_MIME: &str = "application/octet-stream";

const EXTENSIONS: &[(&str, &str)] = &[
    ("css", "text/css"),
    ("csv", "text/csv"),
    ("gif", "image/gif"),
    ("gz", "application/gzip"),
    ("htm", "text/html"),
    ("html", "text/html"),
    ("ico", "image/x-icon"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("md", "text/markdown"),
    ("mjs", "application/javascript"),
    ("mp3", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("pdf", "application/pdf"),
    ("png", "image/png"),
    ("svg", "image/svg+xml"),
    ("txt", "text/plain"),
    ("wasm", "application/wasm"),
    ("webm", "video/webm"),
    ("webp", "image/webp"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("xhtml", "application/xhtml+xml"),
    ("xml", "text/xml"),
    ("zip", "application/zip"),
];

/// Content sniffing capability: leading payload bytes in, mime type out.
///
/// Returning `None` defers to the extension table.
pub trait Sniffer {
    fn sniff(&self, head: &[u8]) -> Option<&'static str>;
}

impl<F> Sniffer for F
where
    F: Fn(&[u8]) -> Option<&'static str>,
{
    fn sniff(&self, head: &[u8]) -> Option<&'static str> {
        self(head)
    }
}

/// Built-in magic-byte sniffer.
///
/// Only recognises formats with an unambiguous signature, plus markup that
/// opens with a recognisable root element. Plain text is left to the
/// extension table.
#[derive(Clone, Copy, Debug, Default)]
pub struct MagicSniffer;
impl MagicSniffer {
    const SIGNATURES: &[(&[u8], &str)] = &[
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
        (b"\xFF\xD8\xFF", "image/jpeg"),
        (b"%PDF-", "application/pdf"),
        (b"PK\x03\x04", "application/zip"),
        (b"\x1F\x8B", "application/gzip"),
        (b"wOFF", "font/woff"),
        (b"wOF2", "font/woff2"),
    ];
    const HTML_OPENERS: &[&[u8]] = &[b"<!doctype html", b"<html", b"<head", b"<body"];

    fn starts_with_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
    }

    fn contains_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window.eq_ignore_ascii_case(needle))
    }

    fn sniff_markup(head: &[u8]) -> Option<&'static str> {
        let head = head.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(head);
        let start = head.iter().position(|b| !b.is_ascii_whitespace())?;
        let text = &head[start..];
        if Self::HTML_OPENERS.iter().any(|opener| Self::starts_with_ignore_case(text, opener)) {
            return Some("text/html");
        }
        if Self::starts_with_ignore_case(text, b"<svg") {
            return Some("image/svg+xml");
        }
        if Self::starts_with_ignore_case(text, b"<?xml") {
            if Self::contains_ignore_case(text, b"<svg") {
                return Some("image/svg+xml");
            }
            if Self::contains_ignore_case(text, b"<html") {
                return Some("application/xhtml+xml");
            }
            return Some("text/xml");
        }
        None
    }
}
impl Sniffer for MagicSniffer {
    fn sniff(&self, head: &[u8]) -> Option<&'static str> {
        if head.len() >= 12 && head.starts_with(b"RIFF") && &head[8..12] == b"WEBP" {
            return Some("image/webp");
        }
        Self::SIGNATURES
            .iter()
            .find(|(magic, _)| head.starts_with(magic))
            .map(|(_, mime)| *mime)
            .or_else(|| Self::sniff_markup(head))
    }
}

/// Compiled mime rules for one run.
pub struct MimeResolver<'a> {
    overrides: Vec<(Pattern, String)>,
    sniffer: Option<&'a dyn Sniffer>,
}
impl<'a> MimeResolver<'a> {
    /// Compile override globs once. `sniffer` is `None` when sniffing is
    /// disabled.
    pub fn new(overrides: &[MimeOverride], sniffer: Option<&'a dyn Sniffer>) -> Result<Self> {
        let overrides = overrides
            .iter()
            .map(|rule| {
                let pattern = Pattern::new(&rule.glob)
                    .or_raise(|| ErrorKind::InvalidConfig(format!("bad mime override glob \"{}\"", rule.glob)))?;
                Ok((pattern, rule.mime.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { overrides, sniffer })
    }

    /// Mime type for `resource`, given up to [`SNIFF_LEN`] leading bytes of
    /// its content.
    pub fn resolve(&self, resource: &Resource, head: &[u8]) -> String {
        if let Some((_, mime)) = self.overrides.iter().find(|(pattern, _)| pattern.matches(&resource.source_path)) {
            return mime.clone();
        }
        if let Some(mime) = self.sniffer.and_then(|sniffer| sniffer.sniff(&head[..head.len().min(SNIFF_LEN)])) {
            return mime.to_string();
        }
        by_extension(resource.base_name()).unwrap_or(DEFAULT_MIME).to_string()
    }
}

/// Look a file name's extension up in the fixed table.
pub fn by_extension(name: &str) -> Option<&'static str> {
    let (_, extension) = name.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    EXTENSIONS.iter().find(|(ext, _)| *ext == extension).map(|(_, mime)| *mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use time::OffsetDateTime;
    use warcit_source::Origin;

    fn resource(relative_path: &str) -> Resource {
        Resource {
            relative_path: relative_path.to_string(),
            source_path: format!("/srv/www.iana.org/{relative_path}"),
            size: 0,
            modified: OffsetDateTime::UNIX_EPOCH,
            origin: Origin::Filesystem {
                path: format!("/srv/www.iana.org/{relative_path}").into(),
            },
        }
    }

    #[rstest]
    #[case(b"<!DOCTYPE html><html></html>", Some("text/html"))]
    #[case(b"\n  <html lang=\"en\">", Some("text/html"))]
    #[case(b"\xEF\xBB\xBF<head>", Some("text/html"))]
    #[case(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>", Some("image/svg+xml"))]
    #[case(b"<?xml version=\"1.0\"?><svg/>", Some("image/svg+xml"))]
    #[case(b"<?xml version=\"1.0\"?><feed/>", Some("text/xml"))]
    #[case(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR", Some("image/png"))]
    #[case(b"GIF89a\x01\x00", Some("image/gif"))]
    #[case(b"\xFF\xD8\xFF\xE0", Some("image/jpeg"))]
    #[case(b"RIFF\x00\x00\x00\x00WEBPVP8 ", Some("image/webp"))]
    #[case(b"%PDF-1.7", Some("application/pdf"))]
    #[case(b"wOF2\x00\x01", Some("font/woff2"))]
    #[case(b"body { color: red; }", None)]
    #[case(b"", None)]
    fn test_magic_sniffer(#[case] head: &[u8], #[case] expected: Option<&str>) {
        assert_eq!(MagicSniffer.sniff(head), expected);
    }

    #[rstest]
    #[case("style.css", Some("text/css"))]
    #[case("INDEX.HTM", Some("text/html"))]
    #[case("archive.tar.gz", Some("application/gzip"))]
    #[case("README", None)]
    #[case("data.unknown", None)]
    fn test_by_extension(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(by_extension(name), expected);
    }

    #[test]
    fn test_override_beats_sniffing_and_extension() {
        let overrides = [
            MimeOverride::new("*/index.html", "custom/mime"),
            MimeOverride::new("*.html", "text/plain"),
        ];
        let resolver = MimeResolver::new(&overrides, Some(&MagicSniffer)).unwrap();
        assert_eq!(resolver.resolve(&resource("about/index.html"), b"<html>"), "custom/mime");
        // First match wins, not the most specific.
        assert_eq!(resolver.resolve(&resource("about/other.html"), b"<html>"), "text/plain");
        assert_eq!(resolver.resolve(&resource("logo.png"), b"\x89PNG\r\n\x1a\n"), "image/png");
    }

    #[test]
    fn test_sniffing_then_extension_then_default() {
        let resolver = MimeResolver::new(&[], Some(&MagicSniffer)).unwrap();
        assert_eq!(resolver.resolve(&resource("page.txt"), b"<html><body/>"), "text/html");
        assert_eq!(resolver.resolve(&resource("style.css"), b"body {}"), "text/css");
        assert_eq!(resolver.resolve(&resource("blob"), b"\x00\x01"), DEFAULT_MIME);
    }

    #[test]
    fn test_sniffing_disabled() {
        let resolver = MimeResolver::new(&[], None).unwrap();
        assert_eq!(resolver.resolve(&resource("page.txt"), b"<html><body/>"), "text/plain");
    }

    #[test]
    fn test_injected_sniffer_sees_bounded_sample() {
        let sniffer = |head: &[u8]| (head.len() == SNIFF_LEN).then_some("test/bounded");
        let resolver = MimeResolver::new(&[], Some(&sniffer)).unwrap();
        assert_eq!(resolver.resolve(&resource("big.bin"), &[0u8; 4096]), "test/bounded");
    }

    #[test]
    fn test_invalid_glob() {
        let err = MimeResolver::new(&[MimeOverride::new("[", "text/plain")], None).err().unwrap();
        assert!(matches!(&*err, ErrorKind::InvalidConfig(_)));
    }
}
