//! The fetch-compare-apply reconciliation pass.

use std::sync::Arc;

use async_trait::async_trait;
use bpaguard_model::OutcomeNotification;
use tracing::info;

use crate::config::BpaConfiguration;
use crate::error::BpaResult;
use crate::types::AccountId;

/// Resolves the account the handler is executing in.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Account id of the current caller.
    async fn current_account_id(&self) -> BpaResult<AccountId>;
}

/// Reads and writes the account-level public access block configuration.
#[async_trait]
pub trait AccountConfigStore: Send + Sync {
    /// Current configuration, or `None` when the account has never been
    /// configured. Absence is a legitimate initial state, not an error.
    async fn fetch(&self, account_id: &AccountId) -> BpaResult<Option<BpaConfiguration>>;

    /// Replace the account-level configuration. Full-replace semantics;
    /// a single attempt with no retries (the orchestrator owns those).
    async fn apply(
        &self,
        account_id: &AccountId,
        configuration: BpaConfiguration,
    ) -> BpaResult<()>;
}

/// Publishes outcome notifications to an external channel.
#[async_trait]
pub trait OutcomeNotifier: Send + Sync {
    /// Publish a notification to the given topic.
    async fn publish(&self, topic_arn: &str, notification: &OutcomeNotification) -> BpaResult<()>;
}

#[async_trait]
impl<T: IdentityResolver + ?Sized> IdentityResolver for Arc<T> {
    async fn current_account_id(&self) -> BpaResult<AccountId> {
        (**self).current_account_id().await
    }
}

#[async_trait]
impl<T: AccountConfigStore + ?Sized> AccountConfigStore for Arc<T> {
    async fn fetch(&self, account_id: &AccountId) -> BpaResult<Option<BpaConfiguration>> {
        (**self).fetch(account_id).await
    }

    async fn apply(
        &self,
        account_id: &AccountId,
        configuration: BpaConfiguration,
    ) -> BpaResult<()> {
        (**self).apply(account_id, configuration).await
    }
}

#[async_trait]
impl<T: OutcomeNotifier + ?Sized> OutcomeNotifier for Arc<T> {
    async fn publish(&self, topic_arn: &str, notification: &OutcomeNotification) -> BpaResult<()> {
        (**self).publish(topic_arn, notification).await
    }
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// Account the configuration applies to.
    pub account_id: AccountId,
    /// Configuration observed before the pass (absence normalized to
    /// all-false).
    pub previous: BpaConfiguration,
    /// Configuration in effect after the pass.
    pub current: BpaConfiguration,
    /// Whether a write was performed.
    pub changed: bool,
}

impl ReconcileOutcome {
    /// Outcome message, reported as the response reason and in notifications.
    #[must_use]
    pub fn message(&self) -> &'static str {
        if self.changed {
            "S3 Block Public Access fully enabled at account level"
        } else {
            "S3 Block Public Access already fully enabled at account level"
        }
    }
}

/// Converges the account-level configuration on the fully-enabled state.
#[derive(Debug, Clone)]
pub struct Reconciler<I, S> {
    identity: I,
    store: S,
}

impl<I, S> Reconciler<I, S>
where
    I: IdentityResolver,
    S: AccountConfigStore,
{
    /// Create a reconciler over the given collaborators.
    pub fn new(identity: I, store: S) -> Self {
        Self { identity, store }
    }

    /// Run one fetch-compare-apply pass.
    ///
    /// The write is skipped when the current configuration already equals
    /// the desired one, so running twice in a row performs exactly one
    /// write and the second pass reports `changed = false`.
    pub async fn run(&self) -> BpaResult<ReconcileOutcome> {
        let account_id = self.identity.current_account_id().await?;
        let desired = BpaConfiguration::ENABLED;

        let previous = self
            .store
            .fetch(&account_id)
            .await?
            .unwrap_or(BpaConfiguration::DISABLED);

        if previous == desired {
            info!(account_id = %account_id, "S3 Block Public Access already fully enabled");
            return Ok(ReconcileOutcome {
                account_id,
                previous,
                current: previous,
                changed: false,
            });
        }

        info!(
            account_id = %account_id,
            previous = ?previous,
            "enabling full S3 Block Public Access protection"
        );
        self.store.apply(&account_id, desired).await?;

        Ok(ReconcileOutcome {
            account_id,
            previous,
            current: desired,
            changed: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::error::BpaError;
    use crate::testing::{RecordingStore, StaticIdentity, StoreFailure, test_account_id};

    fn reconciler(store: &Arc<RecordingStore>) -> Reconciler<StaticIdentity, Arc<RecordingStore>> {
        Reconciler::new(StaticIdentity::default(), Arc::clone(store))
    }

    #[tokio::test]
    async fn test_should_apply_full_protection_when_unconfigured() {
        let store = Arc::new(RecordingStore::with_current(None));

        let outcome = reconciler(&store).run().await.unwrap();

        assert_eq!(outcome.account_id, test_account_id());
        assert_eq!(outcome.previous, BpaConfiguration::DISABLED);
        assert_eq!(outcome.current, BpaConfiguration::ENABLED);
        assert!(outcome.changed);
        assert_eq!(store.applied.lock().unwrap().as_slice(), &[BpaConfiguration::ENABLED]);
    }

    #[tokio::test]
    async fn test_should_treat_absent_configuration_like_all_false() {
        let absent = Arc::new(RecordingStore::with_current(None));
        let disabled = Arc::new(RecordingStore::with_current(Some(BpaConfiguration::DISABLED)));

        let from_absent = reconciler(&absent).run().await.unwrap();
        let from_disabled = reconciler(&disabled).run().await.unwrap();

        assert_eq!(from_absent.previous, from_disabled.previous);
        assert_eq!(from_absent.changed, from_disabled.changed);
        assert_eq!(*absent.applied.lock().unwrap(), *disabled.applied.lock().unwrap());
    }

    #[tokio::test]
    async fn test_should_skip_write_when_already_enabled() {
        let store = Arc::new(RecordingStore::with_current(Some(BpaConfiguration::ENABLED)));

        let outcome = reconciler(&store).run().await.unwrap();

        assert!(!outcome.changed);
        assert_eq!(outcome.message(), "S3 Block Public Access already fully enabled at account level");
        assert!(store.applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_should_apply_when_partially_enabled() {
        let partial = BpaConfiguration {
            block_public_acls: true,
            ignore_public_acls: true,
            block_public_policy: false,
            restrict_public_buckets: true,
        };
        let store = Arc::new(RecordingStore::with_current(Some(partial)));

        let outcome = reconciler(&store).run().await.unwrap();

        assert!(outcome.changed);
        assert_eq!(outcome.previous, partial);
        assert_eq!(store.applied.lock().unwrap().as_slice(), &[BpaConfiguration::ENABLED]);
    }

    #[tokio::test]
    async fn test_should_be_idempotent_across_two_passes() {
        let store = Arc::new(RecordingStore::with_current(None));
        let reconciler = reconciler(&store);

        let first = reconciler.run().await.unwrap();
        let second = reconciler.run().await.unwrap();

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(store.applied.lock().unwrap().len(), 1);
        assert_eq!(store.fetch_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_should_propagate_fetch_failure() {
        let store = Arc::new(
            RecordingStore::with_current(None).failing_fetch(StoreFailure::AccessDenied),
        );

        let err = reconciler(&store).run().await.unwrap_err();

        assert!(matches!(err, BpaError::AccessDenied { .. }));
        assert!(store.applied.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_should_propagate_apply_failure() {
        let store = Arc::new(
            RecordingStore::with_current(None)
                .failing_apply(StoreFailure::Service("InternalError: try again".to_owned())),
        );

        let err = reconciler(&store).run().await.unwrap_err();

        assert!(matches!(err, BpaError::Apply { .. }));
    }
}
