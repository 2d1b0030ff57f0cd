//! Operator request validation and VAA construction.

use crate::error::ValidationError;
use crate::types::{GuardianAddress, GuardianSetUpdateRequest};
use crate::vaa::{
    timestamp_from_unix, GuardianSetUpdate, Payload, Vaa, MAX_GUARDIAN_COUNT,
    SUPPORTED_VAA_VERSION,
};

/// Convert a guardian set update request into its canonical VAA.
///
/// Checks, in order:
/// 1. The set is not empty
/// 2. The set has at most [`MAX_GUARDIAN_COUNT`] guardians
/// 3. Every pubkey is a 20-byte hex address (stops at the first bad one)
/// 4. The current index has a successor
///
/// Nothing is constructed unless every check passes.
pub fn guardian_set_update_to_vaa(req: &GuardianSetUpdateRequest) -> Result<Vaa, ValidationError> {
    if req.guardians.is_empty() {
        return Err(ValidationError::EmptyGuardianSet);
    }

    if req.guardians.len() > MAX_GUARDIAN_COUNT {
        return Err(ValidationError::GuardianSetTooLarge {
            count: req.guardians.len(),
            max: MAX_GUARDIAN_COUNT,
        });
    }

    let keys = req
        .guardians
        .iter()
        .enumerate()
        .map(|(index, g)| {
            GuardianAddress::from_hex(&g.pubkey).map_err(|_| ValidationError::MalformedPubkey {
                index,
                name: g.name.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let new_index = req
        .current_set_index
        .checked_add(1)
        .ok_or(ValidationError::GuardianSetIndexOverflow(req.current_set_index))?;

    Ok(Vaa {
        version: SUPPORTED_VAA_VERSION,
        guardian_set_index: req.current_set_index,
        timestamp: timestamp_from_unix(req.timestamp),
        signatures: Vec::new(),
        payload: Payload::GuardianSetUpdate(GuardianSetUpdate { keys, new_index }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::signing_digest;
    use crate::types::Guardian;
    use proptest::prelude::*;

    fn pubkey(i: usize) -> String {
        format!("0x{:040x}", i + 1)
    }

    fn make_request(n: usize, index: u32, ts: u32) -> GuardianSetUpdateRequest {
        GuardianSetUpdateRequest {
            guardians: (0..n)
                .map(|i| Guardian::new(format!("guardian-{i}"), pubkey(i)))
                .collect(),
            current_set_index: index,
            timestamp: ts,
        }
    }

    fn update_of(vaa: &Vaa) -> &GuardianSetUpdate {
        let Payload::GuardianSetUpdate(update) = &vaa.payload;
        update
    }

    #[test]
    fn test_single_guardian() {
        let req = GuardianSetUpdateRequest {
            guardians: vec![Guardian::new("A", "0x0000000000000000000000000000000000000001")],
            current_set_index: 0,
            timestamp: 1000,
        };
        let vaa = guardian_set_update_to_vaa(&req).unwrap();

        assert_eq!(vaa.version, SUPPORTED_VAA_VERSION);
        assert_eq!(vaa.guardian_set_index, 0);
        assert_eq!(vaa.unix_timestamp().unwrap(), 1000);
        assert!(vaa.signatures.is_empty());

        let update = update_of(&vaa);
        assert_eq!(update.new_index, 1);
        let mut expected = [0u8; 20];
        expected[19] = 1;
        assert_eq!(update.keys, vec![GuardianAddress::from_bytes(expected)]);
    }

    #[test]
    fn test_empty_guardian_set() {
        let req = make_request(0, 0, 1000);
        assert_eq!(
            guardian_set_update_to_vaa(&req),
            Err(ValidationError::EmptyGuardianSet)
        );
    }

    #[test]
    fn test_max_guardians_accepted() {
        let req = make_request(MAX_GUARDIAN_COUNT, 0, 1000);
        let vaa = guardian_set_update_to_vaa(&req).unwrap();
        assert_eq!(update_of(&vaa).keys.len(), MAX_GUARDIAN_COUNT);
    }

    #[test]
    fn test_too_many_guardians() {
        let req = make_request(MAX_GUARDIAN_COUNT + 1, 0, 1000);
        let err = guardian_set_update_to_vaa(&req).unwrap_err();
        assert_eq!(
            err,
            ValidationError::GuardianSetTooLarge {
                count: MAX_GUARDIAN_COUNT + 1,
                max: MAX_GUARDIAN_COUNT,
            }
        );
        assert_eq!(err.to_string(), "too many guardians - 20, maximum is 19");
    }

    #[test]
    fn test_size_checked_before_pubkeys() {
        let mut req = make_request(MAX_GUARDIAN_COUNT + 1, 0, 1000);
        req.guardians[0].pubkey = "garbage".into();
        assert!(matches!(
            guardian_set_update_to_vaa(&req),
            Err(ValidationError::GuardianSetTooLarge { .. })
        ));
    }

    #[test]
    fn test_first_malformed_pubkey_reported() {
        let mut req = make_request(5, 0, 1000);
        req.guardians[2].pubkey = "0x1234".into();
        req.guardians[4].pubkey = "not hex at all".into();

        let err = guardian_set_update_to_vaa(&req).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MalformedPubkey {
                index: 2,
                name: "guardian-2".into()
            }
        );
        assert_eq!(err.to_string(), "invalid pubkey format at index 2 (guardian-2)");
    }

    #[test]
    fn test_index_overflow() {
        let req = make_request(1, u32::MAX, 1000);
        assert_eq!(
            guardian_set_update_to_vaa(&req),
            Err(ValidationError::GuardianSetIndexOverflow(u32::MAX))
        );
    }

    #[test]
    fn test_same_request_same_digest() {
        let req = make_request(3, 7, 1_600_000_000);
        let d1 = signing_digest(&guardian_set_update_to_vaa(&req).unwrap()).unwrap();
        let d2 = signing_digest(&guardian_set_update_to_vaa(&req.clone()).unwrap()).unwrap();
        assert_eq!(d1, d2);
    }

    proptest! {
        #[test]
        fn valid_sets_build(
            n in 1usize..=MAX_GUARDIAN_COUNT,
            index in 0u32..u32::MAX,
            ts in any::<u32>(),
        ) {
            let req = make_request(n, index, ts);
            let vaa = guardian_set_update_to_vaa(&req).unwrap();
            let update = update_of(&vaa);

            prop_assert_eq!(vaa.guardian_set_index, index);
            prop_assert_eq!(update.new_index, index + 1);
            prop_assert_eq!(update.keys.len(), n);
            for (key, guardian) in update.keys.iter().zip(&req.guardians) {
                prop_assert_eq!(key, &GuardianAddress::from_hex(&guardian.pubkey).unwrap());
            }
            prop_assert!(signing_digest(&vaa).is_ok());
        }

        #[test]
        fn single_malformed_pubkey_is_located(
            n in 1usize..=MAX_GUARDIAN_COUNT,
            bad in any::<prop::sample::Index>(),
            junk in "[g-z]{1,40}",
        ) {
            let bad = bad.index(n);
            let mut req = make_request(n, 0, 1000);
            req.guardians[bad].pubkey = junk;

            let err = guardian_set_update_to_vaa(&req).unwrap_err();
            prop_assert_eq!(
                err,
                ValidationError::MalformedPubkey { index: bad, name: format!("guardian-{bad}") }
            );
        }
    }
}
