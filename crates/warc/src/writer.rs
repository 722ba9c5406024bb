use crate::WarcRecord;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::io::Write;
use tracing::instrument;
use warcit_compress::Compression;

/// Appends framed records to an output stream.
///
/// With [`Compression::Gzip`] every record becomes its own gzip member, so
/// the file decompresses as one stream while each record boundary stays
/// addressable. With [`Compression::None`] records are concatenated as-is.
///
/// # Examples
///
/// ```
/// use warcit_compress::Compression;
/// use warcit_warc::{RecordId, RecordWriter, WarcRecord, date::WarcDate};
///
/// let mut writer = RecordWriter::new(Vec::new(), Compression::None);
/// writer.write(&WarcRecord::Warcinfo {
///     record_id: RecordId::new(),
///     date: WarcDate::now(),
///     filename: None,
///     fields: vec![("software".into(), "example".into())],
/// }).unwrap();
/// let bytes = writer.finish().unwrap();
/// assert!(bytes.starts_with(b"WARC/1.0\r\nWARC-Type: warcinfo\r\n"));
/// ```
pub struct RecordWriter<W: Write> {
    inner: W,
    compression: Compression,
    buffer: Vec<u8>,
    written: u64,
}
impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, compression: Compression) -> Self {
        Self {
            inner,
            compression,
            buffer: Vec::new(),
            written: 0,
        }
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Physical bytes written so far by this writer.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Serialize, compress (as one unit) and append a record. Returns the
    /// number of physical bytes appended.
    #[instrument(skip_all, fields(kind = record.kind(), compression = %self.compression, size))]
    pub fn write(&mut self, record: &WarcRecord) -> Result<u64> {
        let raw = record.to_bytes();
        self.buffer.clear();
        self.compression.compress_into(&raw, &mut self.buffer).or_raise(|| ErrorKind::Compression)?;
        self.inner.write_all(&self.buffer).or_raise(|| ErrorKind::Io)?;
        let size = self.buffer.len() as u64;
        self.written += size;
        tracing::Span::current().record("size", size);
        Ok(size)
    }

    /// Flush and hand back the underlying stream.
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush().or_raise(|| ErrorKind::Io)?;
        Ok(self.inner)
    }
}
