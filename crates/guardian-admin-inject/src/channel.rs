//! Bounded in-process injection queue.

use async_trait::async_trait;
use guardian_admin_core::Vaa;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::{TryRecvError, TrySendError};

use crate::error::{InjectError, Result};
use crate::Injector;

/// What a producer does when the queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendPolicy {
    /// Wait for the consumer to make room. The caller's latency grows with
    /// consumer lag; an error is only returned if the consumer is gone.
    #[default]
    Block,
    /// Return [`InjectError::Full`] immediately.
    FailFast,
}

/// Configuration for the injection queue.
#[derive(Debug, Clone)]
pub struct InjectionConfig {
    /// Number of VAAs the queue holds before the send policy applies.
    pub capacity: usize,
    /// Behavior when the queue is full.
    pub policy: SendPolicy,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            capacity: 16,
            policy: SendPolicy::Block,
        }
    }
}

/// Create a bounded injection queue.
///
/// A capacity of zero is raised to one.
pub fn injection_channel(config: InjectionConfig) -> (ChannelInjector, InjectionQueue) {
    let capacity = config.capacity.max(1);
    let (tx, rx) = mpsc::channel(capacity);
    (
        ChannelInjector {
            tx,
            policy: config.policy,
            capacity,
        },
        InjectionQueue { rx },
    )
}

/// Producer handle. Cheap to clone; all clones feed the same queue.
#[derive(Debug, Clone)]
pub struct ChannelInjector {
    tx: mpsc::Sender<Vaa>,
    policy: SendPolicy,
    capacity: usize,
}

impl ChannelInjector {
    /// The configured send policy.
    pub fn policy(&self) -> SendPolicy {
        self.policy
    }

    /// Queue capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the consumer has dropped its end.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[async_trait]
impl Injector for ChannelInjector {
    async fn inject(&self, vaa: Vaa) -> Result<()> {
        match self.policy {
            SendPolicy::Block => self.tx.send(vaa).await.map_err(|_| InjectError::Closed),
            SendPolicy::FailFast => self.tx.try_send(vaa).map_err(|e| match e {
                TrySendError::Full(_) => InjectError::Full {
                    capacity: self.capacity,
                },
                TrySendError::Closed(_) => InjectError::Closed,
            }),
        }?;
        tracing::debug!(policy = ?self.policy, "VAA handed to core pipeline");
        Ok(())
    }
}

/// Consumer handle, owned by the core pipeline.
#[derive(Debug)]
pub struct InjectionQueue {
    rx: mpsc::Receiver<Vaa>,
}

impl InjectionQueue {
    /// Receive the next VAA in enqueue order.
    ///
    /// Returns `None` once every producer is dropped and the queue is drained.
    pub async fn recv(&mut self) -> Option<Vaa> {
        self.rx.recv().await
    }

    /// Receive without waiting.
    ///
    /// Returns `Ok(None)` if the queue is momentarily empty and
    /// `Err(InjectError::Closed)` once it is empty and all producers are gone.
    pub fn try_recv(&mut self) -> Result<Option<Vaa>> {
        match self.rx.try_recv() {
            Ok(vaa) => Ok(Some(vaa)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(InjectError::Closed),
        }
    }
}
