//! Admin server configuration.

use std::path::PathBuf;

use guardian_admin_inject::{InjectionConfig, SendPolicy};

use crate::protocol::DEFAULT_MAX_FRAME_SIZE;

/// Default location of the admin socket.
pub const DEFAULT_SOCKET_PATH: &str = "/run/guardiand/admin.sock";

/// Configuration for the admin server.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Filesystem path of the admin Unix socket.
    pub socket_path: PathBuf,
    /// Largest request frame accepted, in bytes.
    pub max_frame_size: usize,
    /// Injection queue sizing and backpressure.
    pub injection: InjectionConfig,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            injection: InjectionConfig::default(),
        }
    }
}

impl AdminConfig {
    pub fn with_socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.socket_path = path.into();
        self
    }

    pub fn with_max_frame_size(mut self, max: usize) -> Self {
        self.max_frame_size = max;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.injection.capacity = capacity;
        self
    }

    pub fn with_send_policy(mut self, policy: SendPolicy) -> Self {
        self.injection.policy = policy;
        self
    }
}
