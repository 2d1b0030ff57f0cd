//! # Guardian Admin
//!
//! The admin control plane of a guardian node, in one crate.
//!
//! ## Overview
//!
//! Operators rotate the guardian set by submitting the new member list over
//! a local Unix socket. The server validates the list, builds a guardian set
//! update VAA, computes its Keccak-256 signing digest, and queues it for the
//! node's signing pipeline.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use guardian_admin::server::AdminClient;
//! use guardian_admin::template::guardian_set_template;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let request = guardian_set_template(4, 0, 1_600_000_000)?;
//!
//! let mut client = AdminClient::connect("/run/guardiand/admin.sock").await?;
//! let digest = client.submit_guardian_set_vaa(request).await?;
//! println!("queued VAA {digest}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `guardian_admin::core` - VAA, addresses, canonical encoding, digest
//! - `guardian_admin::inject` - Injection channel to the core pipeline
//! - `guardian_admin::server` - Admin socket server, protocol, and client

pub mod template;

// Re-export component crates
pub use guardian_admin_core as core;
pub use guardian_admin_inject as inject;
pub use guardian_admin_server as server;

// Re-export commonly used types
pub use guardian_admin_core::{
    guardian_set_update_to_vaa, signing_digest, Digest, Guardian, GuardianAddress,
    GuardianSetUpdateRequest, Vaa, ValidationError, MAX_GUARDIAN_COUNT,
};
pub use guardian_admin_inject::{injection_channel, InjectionConfig, InjectionQueue, SendPolicy};
pub use guardian_admin_server::{AdminClient, AdminConfig, AdminServer, ServerError, ServerState};
