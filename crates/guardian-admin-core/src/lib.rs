//! # Guardian Admin Core
//!
//! Pure primitives for the guardian admin control plane: guardian addresses,
//! VAAs, canonical encoding, and signing digests.
//!
//! This crate contains no I/O, no sockets, no channels. Everything here is a
//! pure function over immutable values and is safe to call concurrently.
//!
//! ## Key Types
//!
//! - [`Vaa`] - A Verifiable Action Approval (the attestation guardians sign)
//! - [`GuardianSetUpdateRequest`] - Operator input for a guardian set rotation
//! - [`GuardianAddress`] - A 20-byte guardian signing address
//! - [`Digest`] - Keccak-256 of a VAA's canonical signable encoding
//!
//! ## Pipeline
//!
//! ```rust
//! use guardian_admin_core::{guardian_set_update_to_vaa, signing_digest};
//! use guardian_admin_core::{Guardian, GuardianSetUpdateRequest};
//!
//! let request = GuardianSetUpdateRequest {
//!     guardians: vec![Guardian::new("A", "0x0000000000000000000000000000000000000001")],
//!     current_set_index: 0,
//!     timestamp: 1000,
//! };
//!
//! let vaa = guardian_set_update_to_vaa(&request).unwrap();
//! let digest = signing_digest(&vaa).unwrap();
//! assert_eq!(digest.as_bytes().len(), 32);
//! ```
//!
//! ## Canonicalization
//!
//! The digest pre-image layout is fixed. See the [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod types;
pub mod validation;
pub mod vaa;

pub use canonical::{signable_bytes, signing_digest};
pub use crypto::Digest;
pub use error::{CodecError, InvariantError, ValidationError};
pub use types::{Guardian, GuardianAddress, GuardianSetUpdateRequest};
pub use validation::guardian_set_update_to_vaa;
pub use vaa::{
    GuardianSetUpdate, GuardianSignature, Payload, Vaa, ACTION_GUARDIAN_SET_UPDATE,
    MAX_GUARDIAN_COUNT, SUPPORTED_VAA_VERSION,
};
