//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of the guardian admin control plane must produce
//! identical:
//! - signable_bytes (the digest pre-image)
//! - digest (Keccak-256 of signable_bytes)

use guardian_admin_core::{
    guardian_set_update_to_vaa, signable_bytes, signing_digest, Guardian, GuardianSetUpdateRequest,
};
use serde::{Deserialize, Serialize};

/// A single golden test vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenVector {
    pub name: String,
    pub description: String,

    // Inputs
    pub guardians: Vec<String>, // pubkey strings, in order
    pub current_set_index: u32,
    pub timestamp: u32,

    // Derived outputs (hex, no prefix)
    pub signable_bytes: String,
    pub digest: String,
}

/// All golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "single_guardian".to_string(),
            description: "One guardian, first rotation out of set 0".to_string(),
            guardians: vec!["0x0000000000000000000000000000000000000001".to_string()],
            current_set_index: 0,
            timestamp: 1000,
            signable_bytes: "0100000000000003e80100000001010000000000000000000000000000000000000001"
                .to_string(),
            digest: "e5dd9e86e6c8667d7929100d7454de19955e7bfb8a385caf86e8074164918e62".to_string(),
        },
        GoldenVector {
            name: "two_guardians".to_string(),
            description: "Two guardians, rotation out of set 4".to_string(),
            guardians: vec![
                "0x0000000000000000000000000000000000000001".to_string(),
                "0x0000000000000000000000000000000000000002".to_string(),
            ],
            current_set_index: 4,
            timestamp: 1_600_000_000,
            signable_bytes: concat!(
                "01000000045f5e1000010000000502",
                "0000000000000000000000000000000000000001",
                "0000000000000000000000000000000000000002",
            )
            .to_string(),
            digest: "5ec0c11774908e57a7b791fec478c6e00d39121f3040b1b70bbf8aa95a0831a6".to_string(),
        },
    ]
}

/// Build the operator request a vector describes.
pub fn request_from_vector(vector: &GoldenVector) -> GuardianSetUpdateRequest {
    GuardianSetUpdateRequest {
        guardians: vector
            .guardians
            .iter()
            .enumerate()
            .map(|(i, pubkey)| Guardian::new(format!("g{i}"), pubkey.clone()))
            .collect(),
        current_set_index: vector.current_set_index,
        timestamp: vector.timestamp,
    }
}

/// Check every vector against this implementation.
///
/// Returns `(name, passed, detail)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .into_iter()
        .map(|vector| {
            let outcome = guardian_set_update_to_vaa(&request_from_vector(&vector))
                .map_err(|e| e.to_string())
                .and_then(|vaa| {
                    let bytes = signable_bytes(&vaa).map_err(|e| e.to_string())?;
                    let digest = signing_digest(&vaa).map_err(|e| e.to_string())?;
                    Ok((hex::encode(bytes), digest.to_hex()))
                });

            match outcome {
                Ok((bytes, digest)) if bytes == vector.signable_bytes && digest == vector.digest => {
                    (vector.name, true, digest)
                }
                Ok((bytes, digest)) => (
                    vector.name,
                    false,
                    format!("signable_bytes {bytes}, digest {digest}"),
                ),
                Err(e) => (vector.name, false, e),
            }
        })
        .collect()
}
