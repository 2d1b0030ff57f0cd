//! Client for the admin socket.

use std::path::Path;

use guardian_admin_core::{Digest, GuardianSetUpdateRequest};
use tokio::net::UnixStream;

use crate::error::ProtocolError;
use crate::protocol::{
    recv_message, send_message, AdminRequest, AdminResponse, SubmitGuardianSetVaaRequest,
    DEFAULT_MAX_FRAME_SIZE,
};

/// A connection to a running admin server.
///
/// One connection may carry any number of sequential requests.
pub struct AdminClient {
    stream: UnixStream,
    max_frame_size: usize,
}

impl AdminClient {
    /// Connect to the admin socket at `path`.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, ProtocolError> {
        let stream = UnixStream::connect(path.as_ref()).await?;
        Ok(Self {
            stream,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        })
    }

    /// Set the largest response frame accepted.
    pub fn with_max_frame_size(mut self, max: usize) -> Self {
        self.max_frame_size = max;
        self
    }

    /// Submit a guardian set update and return the digest of the queued VAA.
    ///
    /// Error responses from the server surface as [`ProtocolError::Rejected`].
    pub async fn submit_guardian_set_vaa(
        &mut self,
        guardian_set: GuardianSetUpdateRequest,
    ) -> Result<Digest, ProtocolError> {
        let request = AdminRequest::SubmitGuardianSetVaa(SubmitGuardianSetVaaRequest { guardian_set });
        match self.call(&request).await? {
            AdminResponse::SubmitGuardianSetVaa(response) => Ok(response.digest),
            AdminResponse::Error { code, message } => Err(ProtocolError::Rejected { code, message }),
        }
    }

    async fn call(&mut self, request: &AdminRequest) -> Result<AdminResponse, ProtocolError> {
        send_message(&mut self.stream, request).await?;
        recv_message(&mut self.stream, self.max_frame_size)
            .await?
            .ok_or(ProtocolError::ConnectionClosed)
    }
}
