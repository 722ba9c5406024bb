use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// Globally unique record identifier, rendered as `<urn:uuid:...>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);
impl RecordId {
    /// Mint a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}
impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}
impl From<Uuid> for RecordId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "<{}>", self.0.urn())
    }
}
