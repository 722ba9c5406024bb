#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use warcit_compress::Compression;
use zip::write::SimpleFileOptions;

pub const PREFIX: &str = "http://www.iana.org/";

/// Site fixture, sorted the way sources enumerate it.
pub const SITE: &[(&str, &[u8])] = &[
    ("_css/copy.css", b"body { margin: 0; }"),
    ("_css/screen.css", b"body { margin: 0; }"),
    ("_img/logo.png", b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
    ("about/contact.html", b"<html><body>contact</body></html>"),
    ("about/index.html", b"<html><body>about</body></html>"),
    ("index.html", b"<!DOCTYPE html><html><body>home</body></html>"),
    ("robots.txt", b"User-agent: *\nDisallow:\n"),
];

/// Files plus one alias per index file.
pub const SITE_RECORDS: usize = 9;

/// Scratch layout: `<tmp>/www.iana.org/...` holds the site, `<tmp>/out` is
/// empty and meant for output.
pub struct Workspace {
    pub dir: tempfile::TempDir,
}
impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let site = dir.path().join("www.iana.org");
        for (name, data) in SITE {
            let path = site.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, data).unwrap();
        }
        fs::create_dir(dir.path().join("out")).unwrap();
        Self { dir }
    }

    pub fn site(&self) -> String {
        self.dir.path().join("www.iana.org").to_str().unwrap().to_string()
    }

    pub fn out(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    /// Zip the site under a `www.iana.org/` directory entry; returns the
    /// archive path.
    pub fn archive(&self) -> String {
        let path = self.dir.path().join("www.iana.org.zip");
        let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
        let modified = zip::DateTime::from_date_and_time(2017, 10, 17, 14, 30, 26).unwrap();
        let options = SimpleFileOptions::default().last_modified_time(modified);
        writer.add_directory("www.iana.org/", options).unwrap();
        for (name, data) in SITE {
            writer.start_file(format!("www.iana.org/{name}"), options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
        path.to_str().unwrap().to_string()
    }
}

/// A parsed record.
#[derive(Debug)]
pub struct Record {
    pub headers: Vec<(String, String)>,
    pub payload: Vec<u8>,
}
impl Record {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }

    pub fn kind(&self) -> &str {
        self.header("WARC-Type").unwrap()
    }

    /// Target URI, or `""` for `warcinfo`.
    pub fn target(&self) -> &str {
        self.header("WARC-Target-URI").unwrap_or_default()
    }
}

/// Read back every record of a WARC file, decompressing by file extension.
pub fn read_records(path: &Path) -> Vec<Record> {
    let raw = fs::read(path).unwrap();
    let data = Compression::from_path(path).decompress(&raw).unwrap();
    parse_records(&data)
}

pub fn parse_records(mut data: &[u8]) -> Vec<Record> {
    let mut records = Vec::new();
    while !data.is_empty() {
        let end = find(data, b"\r\n\r\n").expect("header terminator");
        let head = std::str::from_utf8(&data[..end]).unwrap();
        let mut lines = head.split("\r\n");
        assert_eq!(lines.next(), Some("WARC/1.0"));
        let headers: Vec<(String, String)> = lines
            .map(|line| {
                let (key, value) = line.split_once(": ").unwrap();
                (key.to_string(), value.to_string())
            })
            .collect();
        let record = Record { headers, payload: Vec::new() };
        let length: usize = record.header("Content-Length").unwrap().parse().unwrap();
        let start = end + 4;
        let payload = data[start..start + length].to_vec();
        assert_eq!(&data[start + length..start + length + 4], b"\r\n\r\n");
        records.push(Record { payload, ..record });
        data = &data[start + length + 4..];
    }
    records
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
