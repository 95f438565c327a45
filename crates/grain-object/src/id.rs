use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ObjectError, ObjectResult};

/// Length of an id in bytes.
pub const ID_LEN: usize = 32;

/// Content id of a blob body or a tree listing.
///
/// Produced by [`ContentHasher`](crate::hasher::ContentHasher). Equal content
/// under the same domain always yields the same id, so a store can recognise
/// an unchanged method or field across revisions of its file.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId([u8; ID_LEN]);

impl ObjectId {
    /// Wrap a finished digest.
    pub fn from_hash(hash: [u8; ID_LEN]) -> Self {
        Self(hash)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        &self.0
    }

    /// Lowercase hex of the full digest, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The first `chars` hex digits, for log lines. Capped at the full
    /// length.
    pub fn abbrev(&self, chars: usize) -> String {
        let mut hex = self.to_hex();
        hex.truncate(chars.min(ID_LEN * 2));
        hex
    }

    /// Parse a full-length hex id.
    pub fn from_hex(s: &str) -> ObjectResult<Self> {
        let bytes = hex::decode(s).map_err(|e| ObjectError::InvalidHex(e.to_string()))?;
        Self::try_from(bytes.as_slice())
    }
}

impl TryFrom<&[u8]> for ObjectId {
    type Error = ObjectError;

    fn try_from(bytes: &[u8]) -> ObjectResult<Self> {
        <[u8; ID_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| ObjectError::InvalidLength {
                expected: ID_LEN,
                actual: bytes.len(),
            })
    }
}

impl FromStr for ObjectId {
    type Err = ObjectError;

    fn from_str(s: &str) -> ObjectResult<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectId").field(&self.abbrev(12)).finish()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
