//! Compression units.

use crate::Compression;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use flate2::Compression as Level;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use std::io::{Read, Write};
use tracing::instrument;

impl Compression {
    /// One self-contained unit holding `input`.
    ///
    /// ```
    /// use warcit_compress::Compression;
    ///
    /// let mut file = Compression::Gzip.compress(b"first record").unwrap();
    /// file.extend(Compression::Gzip.compress(b", second record").unwrap());
    /// assert_eq!(Compression::Gzip.decompress(&file).unwrap(), b"first record, second record");
    /// ```
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() / 2);
        self.compress_into(input, &mut output)?;
        Ok(output)
    }

    /// Append one unit for `input` to `output`, returning how many bytes were
    /// appended. A gzip unit is a complete member at the best compression
    /// level; an uncompressed unit is `input` itself.
    #[instrument(skip_all, fields(mode = %self, input_size = input.len(), unit_size))]
    pub fn compress_into(&self, input: &[u8], output: &mut Vec<u8>) -> Result<usize> {
        let start = output.len();
        match self {
            Compression::None => output.extend_from_slice(input),
            Compression::Gzip => {
                let mut member = GzEncoder::new(&mut *output, Level::best());
                member.write_all(input).or_raise(|| ErrorKind::Io)?;
                member.finish().or_raise(|| ErrorKind::Io)?;
            },
        }
        let unit_size = output.len() - start;
        tracing::Span::current().record("unit_size", unit_size);
        Ok(unit_size)
    }

    /// Decode a whole file: every concatenated unit, in order, as one stream.
    pub fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        match self {
            Compression::None => Ok(input.to_vec()),
            Compression::Gzip => {
                let mut output = Vec::new();
                MultiGzDecoder::new(input).read_to_end(&mut output).or_raise(|| ErrorKind::InvalidData)?;
                Ok(output)
            },
        }
    }
}
