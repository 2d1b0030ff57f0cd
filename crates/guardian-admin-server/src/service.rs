//! The `SubmitGuardianSetVAA` operation, independent of transport.

use std::sync::Arc;

use guardian_admin_core::{
    guardian_set_update_to_vaa, signing_digest, Digest, GuardianSetUpdateRequest, InvariantError, Vaa,
};
use guardian_admin_inject::Injector;
use tokio::sync::Mutex;
use tracing::info;

use crate::error::SubmitError;
use crate::protocol::SubmitGuardianSetVaaResponse;

type DigestFn = fn(&Vaa) -> Result<Digest, InvariantError>;

/// Admin operations backed by an injection channel.
///
/// Submissions are serialized: build, digest, and enqueue happen under one
/// lock, so the order in which callers are acknowledged is the order in
/// which the core pipeline receives their VAAs.
pub struct AdminService {
    injector: Arc<dyn Injector>,
    submit_lock: Mutex<()>,
    digest: DigestFn,
}

impl AdminService {
    pub fn new(injector: Arc<dyn Injector>) -> Self {
        Self {
            injector,
            submit_lock: Mutex::new(()),
            digest: signing_digest,
        }
    }

    /// Replace the digest step, to exercise the invariant-violation path.
    #[cfg(test)]
    pub(crate) fn with_digest(mut self, digest: DigestFn) -> Self {
        self.digest = digest;
        self
    }

    /// Build a guardian set update VAA, digest it, and queue it for signing.
    ///
    /// On `Ok` the VAA has been enqueued exactly once. On any error nothing
    /// was enqueued.
    pub async fn submit_guardian_set_vaa(
        &self,
        request: &GuardianSetUpdateRequest,
    ) -> Result<SubmitGuardianSetVaaResponse, SubmitError> {
        info!(request = ?request, "guardian set injected via admin socket");

        let _guard = self.submit_lock.lock().await;

        let vaa = guardian_set_update_to_vaa(request)?;
        let digest = (self.digest)(&vaa)?;
        info!(vaa = ?vaa, digest = %digest, "guardian set VAA constructed");

        self.injector.inject(vaa).await?;

        Ok(SubmitGuardianSetVaaResponse { digest })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guardian_admin_core::{Guardian, GuardianAddress, Payload, ValidationError};
    use guardian_admin_inject::{injection_channel, InjectError, InjectionConfig, SendPolicy};

    fn request(keys: &[&str]) -> GuardianSetUpdateRequest {
        GuardianSetUpdateRequest {
            guardians: keys
                .iter()
                .enumerate()
                .map(|(i, k)| Guardian::new(format!("g{i}"), *k))
                .collect(),
            current_set_index: 0,
            timestamp: 1000,
        }
    }

    const KEY_1: &str = "0x0000000000000000000000000000000000000001";
    const KEY_2: &str = "0x0000000000000000000000000000000000000002";

    #[tokio::test]
    async fn test_submit_enqueues_and_returns_digest() {
        let (injector, mut queue) = injection_channel(InjectionConfig::default());
        let service = AdminService::new(Arc::new(injector));

        let response = service.submit_guardian_set_vaa(&request(&[KEY_1])).await.unwrap();
        assert_eq!(
            response.digest,
            Digest::from_hex("e5dd9e86e6c8667d7929100d7454de19955e7bfb8a385caf86e8074164918e62")
                .unwrap()
        );

        let vaa = queue.try_recv().unwrap().unwrap();
        assert_eq!(vaa.signing_digest().unwrap(), response.digest);
        let Payload::GuardianSetUpdate(update) = &vaa.payload;
        assert_eq!(update.new_index, 1);
        assert_eq!(update.keys, vec![GuardianAddress::from_hex(KEY_1).unwrap()]);
        assert_eq!(queue.try_recv().unwrap(), None);
    }

    #[tokio::test]
    async fn test_validation_failure_enqueues_nothing() {
        let (injector, mut queue) = injection_channel(InjectionConfig::default());
        let service = AdminService::new(Arc::new(injector));

        let err = service
            .submit_guardian_set_vaa(&request(&[KEY_1, "not-hex"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SubmitError::InvalidArgument(ValidationError::MalformedPubkey { index: 1, .. })
        ));

        let err = service.submit_guardian_set_vaa(&request(&[])).await.unwrap_err();
        assert_eq!(err.to_string(), "empty guardian set specified");

        assert_eq!(queue.try_recv().unwrap(), None);
    }

    #[tokio::test]
    async fn test_closed_channel_is_unavailable() {
        let (injector, queue) = injection_channel(InjectionConfig::default());
        drop(queue);
        let service = AdminService::new(Arc::new(injector));

        let err = service.submit_guardian_set_vaa(&request(&[KEY_1])).await.unwrap_err();
        assert!(matches!(err, SubmitError::Unavailable(InjectError::Closed)));
    }

    #[tokio::test]
    async fn test_fail_fast_full_is_unavailable() {
        let (injector, mut queue) = injection_channel(InjectionConfig {
            capacity: 1,
            policy: SendPolicy::FailFast,
        });
        let service = AdminService::new(Arc::new(injector));

        service.submit_guardian_set_vaa(&request(&[KEY_1])).await.unwrap();
        let err = service.submit_guardian_set_vaa(&request(&[KEY_2])).await.unwrap_err();
        assert!(matches!(err, SubmitError::Unavailable(InjectError::Full { capacity: 1 })));

        let first = queue.try_recv().unwrap().unwrap();
        let Payload::GuardianSetUpdate(update) = &first.payload;
        assert_eq!(update.keys[0], GuardianAddress::from_hex(KEY_1).unwrap());
        assert_eq!(queue.try_recv().unwrap(), None);
    }

    #[tokio::test]
    async fn test_identical_requests_same_digest() {
        let (injector, _queue) = injection_channel(InjectionConfig::default());
        let service = AdminService::new(Arc::new(injector));

        let a = service.submit_guardian_set_vaa(&request(&[KEY_1, KEY_2])).await.unwrap();
        let b = service.submit_guardian_set_vaa(&request(&[KEY_1, KEY_2])).await.unwrap();
        assert_eq!(a.digest, b.digest);
    }

    #[tokio::test]
    async fn test_digest_failure_enqueues_nothing() {
        let (injector, mut queue) = injection_channel(InjectionConfig::default());
        let service = AdminService::new(Arc::new(injector))
            .with_digest(|_| Err(InvariantError::UnsupportedVersion(2)));

        let err = service.submit_guardian_set_vaa(&request(&[KEY_1])).await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Invariant(InvariantError::UnsupportedVersion(2))
        ));
        assert_eq!(queue.try_recv().unwrap(), None);
    }
}
