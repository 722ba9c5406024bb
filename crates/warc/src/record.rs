use crate::WARC_VERSION;
use crate::date::WarcDate;
use crate::id::RecordId;
use std::borrow::Cow;

const CRLF: &[u8] = b"\r\n";
const WARC_FIELDS: &str = "application/warc-fields";
const IDENTICAL_PAYLOAD_DIGEST: &str = "http://netpreserve.org/warc/1.0/revisit/identical-payload-digest";

/// The earlier record a revisit points back to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefersTo {
    pub record_id: Option<RecordId>,
    pub target_uri: String,
    pub date: WarcDate,
}

/// One logical record, before framing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarcRecord {
    /// Metadata about the run that produced the file. The fields are written
    /// as an `application/warc-fields` block.
    Warcinfo {
        record_id: RecordId,
        date: WarcDate,
        filename: Option<String>,
        fields: Vec<(String, String)>,
    },
    /// First occurrence of a payload, written as a `resource` record.
    Content {
        record_id: RecordId,
        target_uri: String,
        date: WarcDate,
        content_type: String,
        digest: String,
        payload: Vec<u8>,
    },
    /// A payload identical to an earlier record; carries no payload.
    Revisit {
        record_id: RecordId,
        target_uri: String,
        date: WarcDate,
        digest: String,
        refers_to: RefersTo,
    },
}

impl WarcRecord {
    /// Value of the `WARC-Type` header.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Warcinfo { .. } => "warcinfo",
            Self::Content { .. } => "resource",
            Self::Revisit { .. } => "revisit",
        }
    }

    pub fn record_id(&self) -> RecordId {
        match self {
            Self::Warcinfo { record_id, .. } | Self::Content { record_id, .. } | Self::Revisit { record_id, .. } => {
                *record_id
            },
        }
    }

    pub fn target_uri(&self) -> Option<&str> {
        match self {
            Self::Warcinfo { .. } => None,
            Self::Content { target_uri, .. } | Self::Revisit { target_uri, .. } => Some(target_uri),
        }
    }

    /// The record block: exactly the bytes counted by `Content-Length`.
    pub fn payload(&self) -> Cow<'_, [u8]> {
        match self {
            Self::Warcinfo { fields, .. } => {
                let mut block = Vec::new();
                for (name, value) in fields {
                    block.extend_from_slice(name.as_bytes());
                    block.extend_from_slice(b": ");
                    block.extend_from_slice(value.as_bytes());
                    block.extend_from_slice(CRLF);
                }
                Cow::Owned(block)
            },
            Self::Content { payload, .. } => Cow::Borrowed(payload),
            Self::Revisit { .. } => Cow::Borrowed(&[]),
        }
    }

    /// Ordered header fields for a block of `content_length` bytes.
    fn headers(&self, content_length: usize) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("WARC-Type", self.kind().to_string()),
            ("WARC-Record-ID", self.record_id().to_string()),
        ];
        match self {
            Self::Warcinfo { date, filename, .. } => {
                headers.push(("WARC-Date", date.to_string()));
                if let Some(filename) = filename {
                    headers.push(("WARC-Filename", filename.clone()));
                }
                headers.push(("Content-Type", WARC_FIELDS.to_string()));
            },
            Self::Content {
                target_uri,
                date,
                content_type,
                digest,
                ..
            } => {
                headers.push(("WARC-Date", date.to_string()));
                headers.push(("WARC-Target-URI", target_uri.clone()));
                headers.push(("WARC-Payload-Digest", digest.clone()));
                // A resource record's block is its payload.
                headers.push(("WARC-Block-Digest", digest.clone()));
                headers.push(("Content-Type", content_type.clone()));
            },
            Self::Revisit {
                target_uri,
                date,
                digest,
                refers_to,
                ..
            } => {
                headers.push(("WARC-Date", date.to_string()));
                headers.push(("WARC-Target-URI", target_uri.clone()));
                headers.push(("WARC-Payload-Digest", digest.clone()));
                headers.push(("WARC-Profile", IDENTICAL_PAYLOAD_DIGEST.to_string()));
                headers.push(("WARC-Refers-To-Target-URI", refers_to.target_uri.clone()));
                headers.push(("WARC-Refers-To-Date", refers_to.date.to_string()));
                if let Some(record_id) = refers_to.record_id {
                    headers.push(("WARC-Refers-To", record_id.to_string()));
                }
            },
        }
        headers.push(("Content-Length", content_length.to_string()));
        headers
    }

    /// Serialize into the uncompressed on-disk framing: version line,
    /// headers, blank line, block, and the two-CRLF record separator.
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload = self.payload();
        let mut out = Vec::with_capacity(payload.len() + 512);
        out.extend_from_slice(WARC_VERSION.as_bytes());
        out.extend_from_slice(CRLF);
        for (name, value) in self.headers(payload.len()) {
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(CRLF);
        }
        out.extend_from_slice(CRLF);
        out.extend_from_slice(&payload);
        out.extend_from_slice(CRLF);
        out.extend_from_slice(CRLF);
        out
    }
}
