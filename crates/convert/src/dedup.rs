//! Per-run content-addressed record memory.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use warcit_warc::RecordId;
use warcit_warc::date::WarcDate;

/// The first record written for a given payload digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigestEntry {
    pub digest: String,
    pub record_id: RecordId,
    pub target_uri: String,
    pub date: WarcDate,
}

/// What to write for a resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordDecision {
    /// First occurrence: write the payload under this (now registered) entry.
    Emit(DigestEntry),
    /// Payload already written: write a revisit pointing at this entry.
    Refer(DigestEntry),
}

/// Digest to first occurrence, for one run only. It is never persisted, and
/// an append run starts empty.
#[derive(Debug, Default)]
pub struct DedupTable {
    entries: HashMap<String, DigestEntry>,
}
impl DedupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a payload. Registers and returns a fresh entry (with a newly
    /// minted record identifier) on first sight of `digest`, otherwise returns
    /// the existing entry, whatever URI it was recorded under.
    pub fn classify(&mut self, digest: &str, target_uri: &str, date: WarcDate) -> RecordDecision {
        match self.entries.entry(digest.to_string()) {
            Entry::Occupied(existing) => RecordDecision::Refer(existing.get().clone()),
            Entry::Vacant(slot) => {
                let entry = DigestEntry {
                    digest: digest.to_string(),
                    record_id: RecordId::new(),
                    target_uri: target_uri.to_string(),
                    date,
                };
                RecordDecision::Emit(slot.insert(entry).clone())
            },
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
