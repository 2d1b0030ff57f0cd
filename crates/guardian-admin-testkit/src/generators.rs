//! Proptest generators for property-based testing.

use proptest::prelude::*;

use guardian_admin_core::{Guardian, GuardianAddress, GuardianSetUpdateRequest, MAX_GUARDIAN_COUNT};

/// Generate a random GuardianAddress.
pub fn guardian_address() -> impl Strategy<Value = GuardianAddress> {
    any::<[u8; 20]>().prop_map(GuardianAddress::from_bytes)
}

/// Generate a well-formed pubkey string for an address.
///
/// Covers the accepted spellings: with or without `0x`, and uppercase digits.
pub fn pubkey_string(address: GuardianAddress) -> impl Strategy<Value = String> {
    let digits = hex::encode(address.as_bytes());
    prop_oneof![
        Just(format!("0x{digits}")),
        Just(digits.clone()),
        Just(format!("0x{}", digits.to_uppercase())),
    ]
}

/// Generate a string that is not a valid guardian address.
pub fn malformed_pubkey() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("0x".to_string()),
        // Wrong length
        "0x[0-9a-f]{1,39}".prop_map(String::from),
        "0x[0-9a-f]{41,64}".prop_map(String::from),
        // Right length, not hex
        "0x[g-z]{40}".prop_map(String::from),
    ]
}

/// Generate a guardian name.
pub fn guardian_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}".prop_map(String::from)
}

/// Generate a list of guardians with well-formed pubkeys.
pub fn guardians(max: usize) -> impl Strategy<Value = Vec<Guardian>> {
    prop::collection::vec(
        (guardian_name(), guardian_address().prop_flat_map(pubkey_string)),
        1..=max,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(name, pubkey)| Guardian { name, pubkey })
            .collect()
    })
}

/// Generate a request the builder accepts.
pub fn guardian_set_request() -> impl Strategy<Value = GuardianSetUpdateRequest> {
    (guardians(MAX_GUARDIAN_COUNT), 0..u32::MAX, any::<u32>()).prop_map(
        |(guardians, current_set_index, timestamp)| GuardianSetUpdateRequest {
            guardians,
            current_set_index,
            timestamp,
        },
    )
}
