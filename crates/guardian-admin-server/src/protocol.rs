//! Admin protocol messages and framing.
//!
//! Every message is a JSON document behind a 4-byte big-endian length
//! prefix:
//!
//! ```text
//! +----------------------------+------------------+
//! | Length (4 bytes, BE)       | JSON payload     |
//! +----------------------------+------------------+
//! ```
//!
//! A connection carries any number of request/response pairs, strictly
//! alternating.

use guardian_admin_core::{Digest, GuardianSetUpdateRequest};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::ProtocolError;

/// Default maximum frame size (1 MiB).
pub const DEFAULT_MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Request body for `SubmitGuardianSetVAA`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitGuardianSetVaaRequest {
    pub guardian_set: GuardianSetUpdateRequest,
}

/// Response body for `SubmitGuardianSetVAA`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitGuardianSetVaaResponse {
    /// Signing digest of the VAA that was queued.
    pub digest: Digest,
}

/// Client-visible error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The request was malformed or failed validation.
    InvalidArgument,
    /// The core pipeline is not accepting VAAs.
    Unavailable,
}

/// All messages from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminRequest {
    SubmitGuardianSetVaa(SubmitGuardianSetVaaRequest),
}

/// All messages from server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminResponse {
    SubmitGuardianSetVaa(SubmitGuardianSetVaaResponse),
    Error { code: ErrorCode, message: String },
}

impl AdminResponse {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        AdminResponse::Error {
            code,
            message: message.into(),
        }
    }
}

/// Read one frame.
///
/// Returns `Ok(None)` only when the stream ends exactly between frames; a
/// partial length prefix or body is [`ProtocolError::ConnectionClosed`].
/// The length is checked against `max_frame_size` before anything is allocated.
pub async fn read_frame<R>(reader: &mut R, max_frame_size: usize) -> Result<Option<Vec<u8>>, ProtocolError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 4];
    let first = reader.read(&mut prefix).await?;
    if first == 0 {
        return Ok(None);
    }
    reader.read_exact(&mut prefix[first..]).await.map_err(eof_is_closed)?;
    let len = u32::from_be_bytes(prefix) as usize;

    if len > max_frame_size {
        return Err(ProtocolError::FrameTooLarge {
            size: len,
            max: max_frame_size,
        });
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await.map_err(eof_is_closed)?;
    Ok(Some(buf))
}

/// A stream ending inside a frame is a dropped connection, not a clean close.
fn eof_is_closed(e: std::io::Error) -> ProtocolError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        ProtocolError::ConnectionClosed
    } else {
        ProtocolError::Io(e)
    }
}

/// Write one frame and flush.
pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let len = u32::try_from(payload.len()).map_err(|_| ProtocolError::FrameTooLarge {
        size: payload.len(),
        max: u32::MAX as usize,
    })?;
    writer.write_u32(len).await?;
    writer.write_all(payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Serialize a message and write it as one frame.
pub async fn send_message<W, T>(writer: &mut W, message: &T) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let bytes = serde_json::to_vec(message)?;
    write_frame(writer, &bytes).await
}

/// Read one frame and deserialize it.
///
/// Returns `Ok(None)` on a clean end of stream.
pub async fn recv_message<R, T>(reader: &mut R, max_frame_size: usize) -> Result<Option<T>, ProtocolError>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    match read_frame(reader, max_frame_size).await? {
        Some(frame) => Ok(Some(serde_json::from_slice(&frame)?)),
        None => Ok(None),
    }
}
