//! Canonical byte encoding for VAAs.
//!
//! All integers are big-endian, all counts are single bytes, there are no
//! optional fields. The same VAA therefore always produces the same bytes
//! (and thus the same digest) on every platform.
//!
//! Body (shared by the signable pre-image and the wire format):
//!
//! ```text
//! timestamp   u32   seconds since epoch
//! action      u8    0x01 = guardian set update
//! new_index   u32
//! key_count   u8
//! keys        20 * key_count bytes, in payload order
//! ```
//!
//! Signable pre-image: `version u8 || guardian_set_index u32 || body`.
//!
//! Wire format: `version u8 || guardian_set_index u32 || sig_count u8 ||
//! (signer_index u8 || signature [u8; 65]) * sig_count || body`.

use crate::crypto::Digest;
use crate::error::{CodecError, InvariantError};
use crate::types::GuardianAddress;
use crate::vaa::{
    timestamp_from_unix, GuardianSetUpdate, GuardianSignature, Payload, Vaa,
    ACTION_GUARDIAN_SET_UPDATE, SUPPORTED_VAA_VERSION,
};

/// Size of one encoded signature entry.
const SIGNATURE_ENTRY_LEN: usize = 1 + 65;

/// Encode the signable portion of a VAA.
///
/// Signatures are excluded. Fails only if the VAA has a shape the encoder
/// does not understand, which validated VAAs never have.
pub fn signable_bytes(vaa: &Vaa) -> Result<Vec<u8>, InvariantError> {
    if vaa.version != SUPPORTED_VAA_VERSION {
        return Err(InvariantError::UnsupportedVersion(vaa.version));
    }

    let mut buf = Vec::with_capacity(64);
    buf.push(vaa.version);
    buf.extend_from_slice(&vaa.guardian_set_index.to_be_bytes());
    encode_body(&mut buf, vaa)?;
    Ok(buf)
}

/// Compute the digest guardians sign: Keccak-256 of [`signable_bytes`].
pub fn signing_digest(vaa: &Vaa) -> Result<Digest, InvariantError> {
    let bytes = signable_bytes(vaa)?;
    Ok(Digest::keccak256(&bytes))
}

/// Encode a full VAA, signatures included.
pub fn encode_vaa(vaa: &Vaa) -> Result<Vec<u8>, InvariantError> {
    if vaa.version != SUPPORTED_VAA_VERSION {
        return Err(InvariantError::UnsupportedVersion(vaa.version));
    }
    let sig_count = u8::try_from(vaa.signatures.len())
        .map_err(|_| InvariantError::TooManySignatures(vaa.signatures.len()))?;

    let mut buf = Vec::with_capacity(64 + vaa.signatures.len() * SIGNATURE_ENTRY_LEN);
    buf.push(vaa.version);
    buf.extend_from_slice(&vaa.guardian_set_index.to_be_bytes());
    buf.push(sig_count);
    for sig in &vaa.signatures {
        buf.push(sig.index);
        buf.extend_from_slice(&sig.signature);
    }
    encode_body(&mut buf, vaa)?;
    Ok(buf)
}

fn encode_body(buf: &mut Vec<u8>, vaa: &Vaa) -> Result<(), InvariantError> {
    buf.extend_from_slice(&vaa.unix_timestamp()?.to_be_bytes());
    buf.push(vaa.payload.action_id());
    match &vaa.payload {
        Payload::GuardianSetUpdate(update) => encode_guardian_set_update(buf, update),
    }
}

fn encode_guardian_set_update(
    buf: &mut Vec<u8>,
    update: &GuardianSetUpdate,
) -> Result<(), InvariantError> {
    let key_count =
        u8::try_from(update.keys.len()).map_err(|_| InvariantError::TooManyKeys(update.keys.len()))?;

    buf.extend_from_slice(&update.new_index.to_be_bytes());
    buf.push(key_count);
    for key in &update.keys {
        buf.extend_from_slice(key.as_bytes());
    }
    Ok(())
}

/// Decode a full VAA from its wire encoding.
pub fn decode_vaa(bytes: &[u8]) -> Result<Vaa, CodecError> {
    let mut r = Reader::new(bytes);

    let version = r.u8()?;
    if version != SUPPORTED_VAA_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }
    let guardian_set_index = r.u32()?;

    let sig_count = r.u8()? as usize;
    let mut signatures = Vec::with_capacity(sig_count);
    for _ in 0..sig_count {
        let index = r.u8()?;
        let signature: [u8; 65] = r.array()?;
        signatures.push(GuardianSignature { index, signature });
    }

    let timestamp = timestamp_from_unix(r.u32()?);
    let payload = match r.u8()? {
        ACTION_GUARDIAN_SET_UPDATE => {
            let new_index = r.u32()?;
            let key_count = r.u8()? as usize;
            let mut keys = Vec::with_capacity(key_count);
            for _ in 0..key_count {
                keys.push(GuardianAddress::from_bytes(r.array()?));
            }
            Payload::GuardianSetUpdate(GuardianSetUpdate { keys, new_index })
        }
        other => return Err(CodecError::UnknownAction(other)),
    };

    if r.remaining() > 0 {
        return Err(CodecError::TrailingBytes(r.remaining()));
    }

    Ok(Vaa {
        version,
        guardian_set_index,
        timestamp,
        signatures,
        payload,
    })
}

/// Bounds-checked cursor over a byte slice.
struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::Truncated {
                offset: self.offset,
                needed: n,
            });
        }
        let slice = &self.bytes[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut arr = [0u8; N];
        arr.copy_from_slice(self.take(N)?);
        Ok(arr)
    }

    fn u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_be_bytes(self.array()?))
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(last: u8) -> GuardianAddress {
        let mut bytes = [0u8; 20];
        bytes[19] = last;
        GuardianAddress::from_bytes(bytes)
    }

    fn make_vaa(index: u32, ts: u32, keys: Vec<GuardianAddress>) -> Vaa {
        Vaa {
            version: SUPPORTED_VAA_VERSION,
            guardian_set_index: index,
            timestamp: timestamp_from_unix(ts),
            signatures: vec![],
            payload: Payload::GuardianSetUpdate(GuardianSetUpdate {
                keys,
                new_index: index + 1,
            }),
        }
    }

    #[test]
    fn test_signable_layout() {
        let vaa = make_vaa(0, 1000, vec![addr(1)]);
        let bytes = signable_bytes(&vaa).unwrap();
        assert_eq!(
            hex::encode(&bytes),
            "0100000000000003e80100000001010000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn test_signing_digest_golden() {
        let vaa = make_vaa(0, 1000, vec![addr(1)]);
        assert_eq!(
            signing_digest(&vaa).unwrap().to_hex(),
            "e5dd9e86e6c8667d7929100d7454de19955e7bfb8a385caf86e8074164918e62"
        );
    }

    #[test]
    fn test_signing_digest_deterministic() {
        let vaa = make_vaa(4, 1_600_000_000, vec![addr(1), addr(2)]);
        assert_eq!(signing_digest(&vaa).unwrap(), signing_digest(&vaa.clone()).unwrap());
    }

    #[test]
    fn test_digest_sensitive_to_every_field() {
        let base = make_vaa(4, 1_600_000_000, vec![addr(1), addr(2)]);
        let d = signing_digest(&base).unwrap();

        let mut other = base.clone();
        other.guardian_set_index = 5;
        assert_ne!(signing_digest(&other).unwrap(), d);

        let mut other = base.clone();
        other.timestamp = timestamp_from_unix(1_600_000_001);
        assert_ne!(signing_digest(&other).unwrap(), d);

        let swapped = make_vaa(4, 1_600_000_000, vec![addr(2), addr(1)]);
        assert_ne!(signing_digest(&swapped).unwrap(), d);

        let mut other = base.clone();
        let Payload::GuardianSetUpdate(update) = &mut other.payload;
        update.new_index = 9;
        assert_ne!(signing_digest(&other).unwrap(), d);
    }

    #[test]
    fn test_signatures_excluded_from_digest() {
        let unsigned = make_vaa(0, 1000, vec![addr(1)]);
        let mut signed = unsigned.clone();
        signed.signatures.push(GuardianSignature {
            index: 0,
            signature: [0x77; 65],
        });
        assert_eq!(signing_digest(&unsigned).unwrap(), signing_digest(&signed).unwrap());
        assert_ne!(unsigned.to_bytes().unwrap(), signed.to_bytes().unwrap());
    }

    #[test]
    fn test_unsupported_version_is_invariant_error() {
        let mut vaa = make_vaa(0, 1000, vec![addr(1)]);
        vaa.version = 2;
        assert_eq!(signing_digest(&vaa), Err(InvariantError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_too_many_keys_is_invariant_error() {
        let keys = (0..256).map(|i| addr(i as u8)).collect();
        let vaa = make_vaa(0, 1000, keys);
        assert_eq!(signing_digest(&vaa), Err(InvariantError::TooManyKeys(256)));
    }

    #[test]
    fn test_wire_roundtrip_with_signatures() {
        let mut vaa = make_vaa(7, 1_600_000_000, vec![addr(1), addr(2), addr(3)]);
        vaa.signatures.push(GuardianSignature {
            index: 2,
            signature: [0x42; 65],
        });

        let bytes = vaa.to_bytes().unwrap();
        assert_eq!(bytes[0], SUPPORTED_VAA_VERSION);
        assert_eq!(bytes[5], 1); // sig count

        let decoded = Vaa::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, vaa);
    }

    #[test]
    fn test_decode_rejects_truncated_and_trailing() {
        let vaa = make_vaa(0, 1000, vec![addr(1)]);
        let bytes = vaa.to_bytes().unwrap();

        let truncated = &bytes[..bytes.len() - 1];
        assert!(matches!(
            Vaa::from_bytes(truncated),
            Err(CodecError::Truncated { .. })
        ));

        let mut trailing = bytes.clone();
        trailing.push(0);
        assert_eq!(Vaa::from_bytes(&trailing), Err(CodecError::TrailingBytes(1)));
    }

    #[test]
    fn test_decode_rejects_unknown_action() {
        let vaa = make_vaa(0, 1000, vec![addr(1)]);
        let mut bytes = vaa.to_bytes().unwrap();
        // version(1) + index(4) + sig_count(1) + timestamp(4)
        bytes[10] = 0x7f;
        assert_eq!(Vaa::from_bytes(&bytes), Err(CodecError::UnknownAction(0x7f)));
    }

    #[test]
    fn test_decode_rejects_other_version() {
        let vaa = make_vaa(0, 1000, vec![addr(1)]);
        let mut bytes = vaa.to_bytes().unwrap();
        bytes[0] = 9;
        assert_eq!(Vaa::from_bytes(&bytes), Err(CodecError::UnsupportedVersion(9)));
    }
}
