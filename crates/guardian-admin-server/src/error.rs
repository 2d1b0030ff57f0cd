//! Error types for the admin server.

use std::io;
use std::path::PathBuf;

use guardian_admin_core::{InvariantError, ValidationError};
use guardian_admin_inject::InjectError;
use thiserror::Error;

use crate::protocol::ErrorCode;

/// Errors that end the server instance.
///
/// All of these are fatal from the supervisor's point of view.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Something other than a socket occupies the configured path.
    #[error("{} is not a UNIX socket", .0.display())]
    NotASocket(PathBuf),

    /// Inspecting, creating, or cleaning up the socket path failed.
    #[error("failed to prepare socket path {}: {source}", .path.display())]
    SocketPath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to listen on {}: {source}", .path.display())]
    Bind {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to restrict permissions on {}: {source}", .path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A validated VAA could not be digested. Internal defect.
    #[error("invariant violated while serving: {0}")]
    Invariant(#[from] InvariantError),
}

/// Errors on the framed request/response protocol.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("frame too large: {size} bytes exceeds maximum {max} bytes")]
    FrameTooLarge { size: usize, max: usize },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("connection closed by peer")]
    ConnectionClosed,

    /// The server answered with an error response.
    #[error("request rejected ({code:?}): {message}")]
    Rejected { code: ErrorCode, message: String },
}

/// Outcome of a failed `SubmitGuardianSetVAA` call.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Bad operator input. Nothing was queued.
    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),

    /// The core pipeline is not accepting VAAs. Nothing was queued.
    #[error(transparent)]
    Unavailable(#[from] InjectError),

    /// Internal defect. Must not be reported as a normal client error.
    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantError),
}

/// Result type for server lifecycle operations.
pub type Result<T> = std::result::Result<T, ServerError>;
