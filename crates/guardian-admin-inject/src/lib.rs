//! # Guardian Admin Inject
//!
//! The hand-off between the admin control plane (producer) and the node's
//! core signing/broadcast pipeline (consumer).
//!
//! ## Contract
//!
//! - **Ordered**: one shared queue, FIFO in enqueue order across all producers
//! - **At-most-once**: once [`Injector::inject`] returns `Ok`, the VAA belongs
//!   to the consumer; nothing here tracks or retries delivery
//! - **Bounded**: the queue has a fixed capacity and an explicit
//!   [`SendPolicy`] for what happens when it is full
//!
//! ## Usage
//!
//! ```rust
//! use guardian_admin_inject::{injection_channel, InjectionConfig, Injector};
//!
//! # async fn example(vaa: guardian_admin_core::Vaa) {
//! let (injector, mut queue) = injection_channel(InjectionConfig::default());
//!
//! injector.inject(vaa).await.unwrap();
//! let next = queue.recv().await;
//! assert!(next.is_some());
//! # }
//! ```

pub mod channel;
pub mod error;

pub use channel::{injection_channel, ChannelInjector, InjectionConfig, InjectionQueue, SendPolicy};
pub use error::{InjectError, Result};

use async_trait::async_trait;
use guardian_admin_core::Vaa;

/// Producer side of the injection channel.
///
/// Implementations must be thread-safe (Send + Sync): the admin server calls
/// this from per-connection tasks.
#[async_trait]
pub trait Injector: Send + Sync {
    /// Hand a VAA to the core pipeline.
    ///
    /// Returning `Ok` commits the VAA. An `Err` means it was not enqueued.
    async fn inject(&self, vaa: Vaa) -> Result<()>;
}
