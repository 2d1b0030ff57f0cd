//! Placeholder guardian set requests.
//!
//! Operators start from a template and replace the placeholder names and
//! addresses with the real guardian keys before submitting.

use guardian_admin_core::{
    Digest, Guardian, GuardianAddress, GuardianSetUpdateRequest, ValidationError,
    MAX_GUARDIAN_COUNT,
};

/// Deterministic placeholder guardian for position `index`.
///
/// The name is `guardian-<index>` and the address is the last 20 bytes of
/// the Keccak-256 hash of that name.
pub fn placeholder_guardian(index: usize) -> Guardian {
    let name = format!("guardian-{index}");
    let hash = Digest::keccak256(name.as_bytes());

    let mut address = [0u8; GuardianAddress::LEN];
    address.copy_from_slice(&hash.as_bytes()[32 - GuardianAddress::LEN..]);

    let pubkey = GuardianAddress::from_bytes(address).to_hex();
    Guardian { name, pubkey }
}

/// Build a request with `num_guardians` placeholder guardians.
///
/// The count must lie within `1..=MAX_GUARDIAN_COUNT`, the same bounds the
/// server enforces.
pub fn guardian_set_template(
    num_guardians: usize,
    current_set_index: u32,
    timestamp: u32,
) -> Result<GuardianSetUpdateRequest, ValidationError> {
    if num_guardians == 0 {
        return Err(ValidationError::EmptyGuardianSet);
    }
    if num_guardians > MAX_GUARDIAN_COUNT {
        return Err(ValidationError::GuardianSetTooLarge {
            count: num_guardians,
            max: MAX_GUARDIAN_COUNT,
        });
    }

    Ok(GuardianSetUpdateRequest {
        guardians: (0..num_guardians).map(placeholder_guardian).collect(),
        current_set_index,
        timestamp,
    })
}
