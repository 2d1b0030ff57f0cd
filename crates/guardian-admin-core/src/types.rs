//! Strong type definitions for guardian identities and operator requests.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 20-byte guardian signing address.
///
/// Rendered as `0x`-prefixed lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuardianAddress(pub [u8; 20]);

impl GuardianAddress {
    /// Length of an address in bytes.
    pub const LEN: usize = 20;

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Convert to `0x`-prefixed hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse from hex string.
    ///
    /// The `0x` (or `0X`) prefix is optional. Exactly 40 hex digits must
    /// follow it.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != 2 * Self::LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 20];
        hex::decode_to_slice(digits, &mut arr)?;
        Ok(Self(arr))
    }

    /// The zero address.
    pub const ZERO: Self = Self([0u8; 20]);
}

impl fmt::Debug for GuardianAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GuardianAddress({})", self.to_hex())
    }
}

impl fmt::Display for GuardianAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for GuardianAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 20]> for GuardianAddress {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl Serialize for GuardianAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for GuardianAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A guardian as named by the operator.
///
/// `pubkey` is kept as the raw operator string; it is only parsed when the
/// request is turned into a VAA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardian {
    pub name: String,
    pub pubkey: String,
}

impl Guardian {
    pub fn new(name: impl Into<String>, pubkey: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pubkey: pubkey.into(),
        }
    }
}

/// Operator request to rotate the guardian set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianSetUpdateRequest {
    /// New guardian set, in the order the keys will appear on chain.
    pub guardians: Vec<Guardian>,
    /// Index of the set that is active now (and signs this update).
    pub current_set_index: u32,
    /// Seconds since the Unix epoch.
    pub timestamp: u32,
}
