//! Verifiable Action Approvals.
//!
//! A VAA is immutable once built. The admin control plane only ever
//! constructs unsigned guardian set updates; signatures are collected
//! downstream by the core pipeline.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::canonical;
use crate::crypto::Digest;
use crate::error::{CodecError, InvariantError};
use crate::types::GuardianAddress;

/// The only VAA version this node produces or accepts.
pub const SUPPORTED_VAA_VERSION: u8 = 1;

/// Maximum number of guardians in a set.
pub const MAX_GUARDIAN_COUNT: usize = 19;

/// Payload action identifier for a guardian set update.
pub const ACTION_GUARDIAN_SET_UPDATE: u8 = 0x01;

/// A guardian set rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardianSetUpdate {
    /// New guardian keys, in set order.
    pub keys: Vec<GuardianAddress>,
    /// Index the new set will be known by.
    pub new_index: u32,
}

/// VAA payload variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    GuardianSetUpdate(GuardianSetUpdate),
}

impl Payload {
    /// Action identifier written ahead of the payload body.
    pub const fn action_id(&self) -> u8 {
        match self {
            Payload::GuardianSetUpdate(_) => ACTION_GUARDIAN_SET_UPDATE,
        }
    }
}

/// A single guardian's signature over a VAA digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardianSignature {
    /// Position of the signer within the signing guardian set.
    pub index: u8,
    /// Recoverable secp256k1 signature (r || s || v).
    pub signature: [u8; 65],
}

/// A Verifiable Action Approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vaa {
    pub version: u8,
    /// Guardian set expected to sign this VAA.
    pub guardian_set_index: u32,
    pub timestamp: SystemTime,
    /// Empty for VAAs built by the admin control plane.
    pub signatures: Vec<GuardianSignature>,
    pub payload: Payload,
}

impl Vaa {
    /// Seconds since the Unix epoch, as encoded on the wire.
    pub fn unix_timestamp(&self) -> Result<u32, InvariantError> {
        let secs = self
            .timestamp
            .duration_since(UNIX_EPOCH)
            .map_err(|_| InvariantError::TimestampOutOfRange)?
            .as_secs();
        u32::try_from(secs).map_err(|_| InvariantError::TimestampOutOfRange)
    }

    /// Digest guardians sign over. See [`canonical::signing_digest`].
    pub fn signing_digest(&self) -> Result<Digest, InvariantError> {
        canonical::signing_digest(self)
    }

    /// Full wire encoding, signatures included.
    pub fn to_bytes(&self) -> Result<Vec<u8>, InvariantError> {
        canonical::encode_vaa(self)
    }

    /// Parse the wire encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        canonical::decode_vaa(bytes)
    }
}

/// Convert wire seconds into an absolute instant.
pub fn timestamp_from_unix(secs: u32) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(u64::from(secs))
}
