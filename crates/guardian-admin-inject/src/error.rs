//! Error types for the injection channel.

use thiserror::Error;

/// Errors handing a VAA to the core pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectError {
    /// The consumer dropped its end of the queue.
    #[error("injection channel closed: core pipeline is not consuming")]
    Closed,

    /// The queue is at capacity and the send policy is fail-fast.
    #[error("injection channel full (capacity {capacity})")]
    Full { capacity: usize },
}

/// Result type for injection operations.
pub type Result<T> = std::result::Result<T, InjectError>;
