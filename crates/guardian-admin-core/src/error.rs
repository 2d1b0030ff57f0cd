//! Error types for the guardian admin core.

use thiserror::Error;

/// Operator input that cannot become a VAA.
///
/// These are reported back to the caller and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty guardian set specified")]
    EmptyGuardianSet,

    #[error("too many guardians - {count}, maximum is {max}")]
    GuardianSetTooLarge { count: usize, max: usize },

    #[error("invalid pubkey format at index {index} ({name})")]
    MalformedPubkey { index: usize, name: String },

    #[error("guardian set index {0} has no successor")]
    GuardianSetIndexOverflow(u32),
}

/// A validated VAA that the canonical encoder cannot encode.
///
/// Seeing one of these means a VAA was constructed outside the builder or the
/// builder and encoder disagree. It is a defect, not bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("unsupported VAA version: {0}")]
    UnsupportedVersion(u8),

    #[error("timestamp is not representable as u32 seconds since epoch")]
    TimestampOutOfRange,

    #[error("payload carries {0} keys, more than a u8 count can encode")]
    TooManyKeys(usize),

    #[error("VAA carries {0} signatures, more than a u8 count can encode")]
    TooManySignatures(usize),
}

/// Errors decoding the VAA wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("unexpected end of input: needed {needed} bytes at offset {offset}")]
    Truncated { offset: usize, needed: usize },

    #[error("unsupported VAA version: {0}")]
    UnsupportedVersion(u8),

    #[error("unknown payload action: {0:#04x}")]
    UnknownAction(u8),

    #[error("{0} trailing bytes after payload")]
    TrailingBytes(usize),

    #[error("encoding error: {0}")]
    Invariant(#[from] InvariantError),
}
