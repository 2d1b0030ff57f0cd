//! Admin server lifecycle and accept loop.
//!
//! ```text
//! Unbound --bind--> Bound --serve--> Serving --shutdown--> Closed
//! ```
//!
//! `serve` binds on its own if `bind` was not called first. The socket file
//! is removed when serving ends, whether by shutdown or by a fatal error.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use guardian_admin_core::InvariantError;
use guardian_admin_inject::Injector;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::config::AdminConfig;
use crate::error::{ProtocolError, Result, ServerError, SubmitError};
use crate::protocol::{
    read_frame, send_message, AdminRequest, AdminResponse, ErrorCode, SubmitGuardianSetVaaResponse,
};
use crate::service::AdminService;
use crate::socket::{bind_admin_socket, remove_socket_file};

/// Observable lifecycle state of an [`AdminServer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Unbound,
    Bound,
    Serving,
    Closed,
}

/// The admin control-plane server.
pub struct AdminServer {
    config: AdminConfig,
    service: Arc<AdminService>,
    listener: Option<UnixListener>,
    state: watch::Sender<ServerState>,
}

impl AdminServer {
    /// Create a server that hands constructed VAAs to `injector`.
    pub fn new(config: AdminConfig, injector: Arc<dyn Injector>) -> Self {
        Self::with_service(config, AdminService::new(injector))
    }

    fn with_service(config: AdminConfig, service: AdminService) -> Self {
        let (state, _) = watch::channel(ServerState::Unbound);
        Self {
            config,
            service: Arc::new(service),
            listener: None,
            state,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServerState {
        *self.state.borrow()
    }

    /// Watch lifecycle transitions.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    pub fn socket_path(&self) -> &Path {
        &self.config.socket_path
    }

    /// Prepare and bind the admin socket.
    ///
    /// Startup errors here are fatal to the instance. Calling `bind` on an
    /// already bound server does nothing.
    pub fn bind(&mut self) -> Result<()> {
        if self.listener.is_none() {
            self.listener = Some(bind_admin_socket(&self.config.socket_path)?);
            self.set_state(ServerState::Bound);
        }
        Ok(())
    }

    /// Accept and serve connections until `shutdown` resolves.
    ///
    /// Returns `Ok(())` after a requested shutdown and
    /// [`ServerError::Invariant`] if a request hit an internal defect.
    /// Handlers already running finish on their own tasks.
    pub async fn serve<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let listener = match self.listener.take() {
            Some(listener) => listener,
            None => {
                let listener = bind_admin_socket(&self.config.socket_path)?;
                self.set_state(ServerState::Bound);
                listener
            }
        };

        self.set_state(ServerState::Serving);
        let (fatal_tx, mut fatal_rx) = mpsc::channel::<InvariantError>(1);
        tokio::pin!(shutdown);

        let outcome = loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("admin server shutting down");
                    break Ok(());
                }
                Some(err) = fatal_rx.recv() => {
                    error!(error = %err, "admin server stopping on invariant violation");
                    break Err(ServerError::Invariant(err));
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, _)) => {
                        debug!("accepted admin connection");
                        let service = Arc::clone(&self.service);
                        let fatal = fatal_tx.clone();
                        let max_frame_size = self.config.max_frame_size;
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(stream, service, max_frame_size, fatal).await {
                                debug!(error = %e, "admin connection closed");
                            }
                        });
                    }
                    Err(e) => warn!(error = %e, "failed to accept admin connection"),
                },
            }
        };

        drop(listener);
        remove_socket_file(&self.config.socket_path);
        self.set_state(ServerState::Closed);
        outcome
    }

    fn set_state(&self, next: ServerState) {
        let prev = self.state.send_replace(next);
        info!(from = ?prev, to = ?next, "admin server state changed");
    }
}

/// Serve request/response pairs on one connection until the peer hangs up.
async fn handle_connection(
    mut stream: UnixStream,
    service: Arc<AdminService>,
    max_frame_size: usize,
    fatal: mpsc::Sender<InvariantError>,
) -> std::result::Result<(), ProtocolError> {
    while let Some(frame) = read_frame(&mut stream, max_frame_size).await? {
        let response = match serde_json::from_slice::<AdminRequest>(&frame) {
            Err(e) => {
                warn!(frame_len = frame.len(), error = %e, "undecodable admin request rejected");
                AdminResponse::error(ErrorCode::InvalidArgument, format!("malformed request: {e}"))
            }
            Ok(AdminRequest::SubmitGuardianSetVaa(request)) => {
                let outcome = service.submit_guardian_set_vaa(&request.guardian_set).await;
                match submit_response(outcome) {
                    Ok(response) => response,
                    Err(err) => {
                        error!(error = %err, "failed to digest validated VAA");
                        let _ = fatal.send(err).await;
                        return Ok(());
                    }
                }
            }
        };
        send_message(&mut stream, &response).await?;
    }
    Ok(())
}

/// Map a submission outcome to the reply the client sees.
///
/// Invariant violations have no reply; they are returned as `Err`.
fn submit_response(
    outcome: std::result::Result<SubmitGuardianSetVaaResponse, SubmitError>,
) -> std::result::Result<AdminResponse, InvariantError> {
    let (code, message) = match outcome {
        Ok(response) => return Ok(AdminResponse::SubmitGuardianSetVaa(response)),
        Err(SubmitError::Invariant(err)) => return Err(err),
        Err(SubmitError::InvalidArgument(err)) => (ErrorCode::InvalidArgument, err.to_string()),
        Err(SubmitError::Unavailable(err)) => (ErrorCode::Unavailable, err.to_string()),
    };
    warn!(code = ?code, error = %message, "guardian set submission rejected");
    Ok(AdminResponse::error(code, message))
}
