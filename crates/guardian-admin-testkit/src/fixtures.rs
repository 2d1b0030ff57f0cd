//! Test fixtures and helpers.
//!
//! Deterministic requests for integration tests.

use guardian_admin_core::{Guardian, GuardianAddress, GuardianSetUpdateRequest};

/// Address whose last byte is `n` and all other bytes zero.
pub fn address(n: u8) -> GuardianAddress {
    let mut bytes = [0u8; GuardianAddress::LEN];
    bytes[GuardianAddress::LEN - 1] = n;
    GuardianAddress::from_bytes(bytes)
}

/// A request with `n` guardians named `g0..` holding addresses `1..=n`.
pub fn guardian_set_request(n: u8, current_set_index: u32, timestamp: u32) -> GuardianSetUpdateRequest {
    GuardianSetUpdateRequest {
        guardians: (0..n)
            .map(|i| Guardian::new(format!("g{i}"), address(i + 1).to_hex()))
            .collect(),
        current_set_index,
        timestamp,
    }
}

/// The single-guardian request whose digest is the first golden vector.
pub fn golden_request() -> GuardianSetUpdateRequest {
    GuardianSetUpdateRequest {
        guardians: vec![Guardian::new("A", address(1).to_hex())],
        current_set_index: 0,
        timestamp: 1000,
    }
}
