//! # Guardian Admin Server
//!
//! The privileged control plane of a guardian node. Operators submit
//! guardian set rotations over a local Unix socket; each accepted request
//! becomes a VAA that is handed to the core signing pipeline.
//!
//! ## Overview
//!
//! - **Socket**: owner-only (0600) Unix socket, stale sockets replaced,
//!   anything else at the path refused (see [`socket`])
//! - **Protocol**: length-prefixed JSON frames (see [`protocol`])
//! - **Service**: `SubmitGuardianSetVAA`, serialized build, digest, enqueue
//! - **Server**: `Unbound -> Bound -> Serving -> Closed` lifecycle
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use guardian_admin_inject::injection_channel;
//! use guardian_admin_server::{AdminConfig, AdminServer};
//!
//! # async fn example() -> guardian_admin_server::Result<()> {
//! let config = AdminConfig::default().with_socket_path("/run/guardiand/admin.sock");
//! let (injector, mut queue) = injection_channel(config.injection.clone());
//!
//! tokio::spawn(async move {
//!     while let Some(vaa) = queue.recv().await {
//!         // sign and broadcast
//!         let _ = vaa;
//!     }
//! });
//!
//! let server = AdminServer::new(config, Arc::new(injector));
//! server.serve(async { let _ = tokio::signal::ctrl_c().await; }).await
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod server;
pub mod service;
pub mod socket;

pub use client::AdminClient;
pub use config::{AdminConfig, DEFAULT_SOCKET_PATH};
pub use error::{ProtocolError, Result, ServerError, SubmitError};
pub use protocol::{
    AdminRequest, AdminResponse, ErrorCode, SubmitGuardianSetVaaRequest,
    SubmitGuardianSetVaaResponse, DEFAULT_MAX_FRAME_SIZE,
};
pub use server::{AdminServer, ServerState};
pub use service::AdminService;
