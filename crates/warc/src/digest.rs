use data_encoding::BASE32;
use sha1::{Digest, Sha1};

/// Payload digest capability.
///
/// Implementations return an algorithm-tagged value such as
/// `sha1:2D5DS7HGZ6XAWWZ7K5IVJAIAZIJSM4RA`, computed over the raw payload.
pub trait PayloadDigest {
    fn digest(&self, payload: &[u8]) -> String;
}

impl<F> PayloadDigest for F
where
    F: Fn(&[u8]) -> String,
{
    fn digest(&self, payload: &[u8]) -> String {
        self(payload)
    }
}

/// SHA-1, base32 encoded: the digest form most WARC tooling expects.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha1Base32;
impl PayloadDigest for Sha1Base32 {
    fn digest(&self, payload: &[u8]) -> String {
        format!("sha1:{}", BASE32.encode(&Sha1::digest(payload)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_base32() {
        // sha1("") = da39a3ee5e6b4b0d3255bfef95601890afd80709
        assert_eq!(Sha1Base32.digest(b""), "sha1:3I42H3S6NNFQ2MSVX7XZKYAYSCX5QBYJ");
    }

    #[test]
    fn test_identical_payloads_share_a_digest() {
        assert_eq!(Sha1Base32.digest(b"<html/>"), Sha1Base32.digest(b"<html/>"));
        assert_ne!(Sha1Base32.digest(b"<html/>"), Sha1Base32.digest(b"<html />"));
    }

    #[test]
    fn test_closures_are_digests() {
        let length = |payload: &[u8]| format!("len:{}", payload.len());
        assert_eq!(length.digest(b"abc"), "len:3");
    }
}
