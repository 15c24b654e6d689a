use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Content-addressed identifier of a single log entry.
///
/// An `EntryHash` is the BLAKE3 hash of an entry's encoded content.
/// Identical content always produces the same `EntryHash`, so a hash
/// identifies exactly one entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryHash([u8; 32]);

impl EntryHash {
    /// Compute an `EntryHash` from raw encoded bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Wrap a pre-computed 32-byte hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for EntryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryHash({})", self.short_hex())
    }
}

impl fmt::Display for EntryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for EntryHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<EntryHash> for [u8; 32] {
    fn from(hash: EntryHash) -> Self {
        hash.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_is_deterministic() {
        let data = b"entry payload";
        assert_eq!(EntryHash::from_bytes(data), EntryHash::from_bytes(data));
    }

    #[test]
    fn different_data_produces_different_hashes() {
        assert_ne!(EntryHash::from_bytes(b"one"), EntryHash::from_bytes(b"two"));
    }

    #[test]
    fn hex_roundtrip() {
        let hash = EntryHash::from_bytes(b"test");
        let parsed = EntryHash::from_hex(&hash.to_hex()).unwrap();
        assert_eq!(hash, parsed);
    }

    #[test]
    fn short_hex_is_8_chars() {
        let hash = EntryHash::from_bytes(b"test");
        assert_eq!(hash.short_hex().len(), 8);
    }

    #[test]
    fn display_is_full_hex() {
        let hash = EntryHash::from_bytes(b"test");
        assert_eq!(format!("{hash}").len(), 64);
    }

    #[test]
    fn serde_roundtrip() {
        let hash = EntryHash::from_bytes(b"serde test");
        let json = serde_json::to_string(&hash).unwrap();
        let parsed: EntryHash = serde_json::from_str(&json).unwrap();
        assert_eq!(hash, parsed);
    }

    #[test]
    fn ordering_is_consistent() {
        let a = EntryHash::from_hash([0; 32]);
        let b = EntryHash::from_hash([1; 32]);
        assert!(a < b);
    }
}
