//! # Guardian Admin Testkit
//!
//! Testing utilities for the guardian admin control plane.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known requests with their expected signable bytes
//!   and signing digests, for cross-implementation verification
//! - **Generators**: Proptest strategies for addresses, pubkey strings, and
//!   guardian set requests
//! - **Fixtures**: Deterministic requests for integration tests
//!
//! ## Golden Vectors
//!
//! ```rust
//! use guardian_admin_testkit::vectors::{all_vectors, request_from_vector};
//! use guardian_admin_core::{guardian_set_update_to_vaa, signing_digest};
//!
//! for vector in all_vectors() {
//!     let vaa = guardian_set_update_to_vaa(&request_from_vector(&vector)).unwrap();
//!     assert_eq!(signing_digest(&vaa).unwrap().to_hex(), vector.digest);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use guardian_admin_testkit::generators::guardian_set_request;
//!
//! proptest! {
//!     #[test]
//!     fn digest_is_deterministic(req in guardian_set_request()) {
//!         let a = guardian_set_update_to_vaa(&req).unwrap();
//!         let b = guardian_set_update_to_vaa(&req).unwrap();
//!         prop_assert_eq!(signing_digest(&a).unwrap(), signing_digest(&b).unwrap());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{address, golden_request, guardian_set_request};
