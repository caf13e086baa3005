//! Hand-rolled collaborator fakes shared by the unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bpaguard_model::OutcomeNotification;

use crate::config::BpaConfiguration;
use crate::error::{BpaError, BpaResult};
use crate::reconciler::{AccountConfigStore, IdentityResolver, OutcomeNotifier};
use crate::types::AccountId;

pub(crate) fn test_account_id() -> AccountId {
    AccountId::new("123456789012").unwrap()
}

/// Identity resolver that always reports the same account.
#[derive(Debug)]
pub(crate) struct StaticIdentity(pub AccountId);

impl Default for StaticIdentity {
    fn default() -> Self {
        Self(test_account_id())
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentity {
    async fn current_account_id(&self) -> BpaResult<AccountId> {
        Ok(self.0.clone())
    }
}

/// Failure a [`RecordingStore`] can be armed with.
#[derive(Debug, Clone)]
pub(crate) enum StoreFailure {
    AccessDenied,
    Service(String),
}

impl StoreFailure {
    fn fetch_error(&self) -> BpaError {
        match self {
            Self::AccessDenied => BpaError::AccessDenied {
                operation: "GetPublicAccessBlock".to_owned(),
            },
            Self::Service(message) => BpaError::Fetch {
                message: message.clone(),
            },
        }
    }

    fn apply_error(&self) -> BpaError {
        match self {
            Self::AccessDenied => BpaError::AccessDenied {
                operation: "PutPublicAccessBlock".to_owned(),
            },
            Self::Service(message) => BpaError::Apply {
                message: message.clone(),
            },
        }
    }
}

/// In-memory configuration store that records every call.
#[derive(Debug, Default)]
pub(crate) struct RecordingStore {
    pub current: Mutex<Option<BpaConfiguration>>,
    pub fetch_calls: AtomicUsize,
    pub applied: Mutex<Vec<BpaConfiguration>>,
    fetch_failure: Option<StoreFailure>,
    apply_failure: Option<StoreFailure>,
}

impl RecordingStore {
    pub(crate) fn with_current(current: Option<BpaConfiguration>) -> Self {
        Self {
            current: Mutex::new(current),
            ..Self::default()
        }
    }

    pub(crate) fn failing_fetch(mut self, failure: StoreFailure) -> Self {
        self.fetch_failure = Some(failure);
        self
    }

    pub(crate) fn failing_apply(mut self, failure: StoreFailure) -> Self {
        self.apply_failure = Some(failure);
        self
    }
}

#[async_trait]
impl AccountConfigStore for RecordingStore {
    async fn fetch(&self, _account_id: &AccountId) -> BpaResult<Option<BpaConfiguration>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = &self.fetch_failure {
            return Err(failure.fetch_error());
        }
        Ok(*self.current.lock().unwrap())
    }

    async fn apply(
        &self,
        _account_id: &AccountId,
        configuration: BpaConfiguration,
    ) -> BpaResult<()> {
        if let Some(failure) = &self.apply_failure {
            return Err(failure.apply_error());
        }
        self.applied.lock().unwrap().push(configuration);
        *self.current.lock().unwrap() = Some(configuration);
        Ok(())
    }
}

/// Notifier that records every publish and can be armed to fail.
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    pub published: Mutex<Vec<(String, OutcomeNotification)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub(crate) fn failing() -> Self {
        Self {
            published: Mutex::default(),
            fail: true,
        }
    }
}

#[async_trait]
impl OutcomeNotifier for RecordingNotifier {
    async fn publish(&self, topic_arn: &str, notification: &OutcomeNotification) -> BpaResult<()> {
        self.published
            .lock()
            .unwrap()
            .push((topic_arn.to_owned(), notification.clone()));
        if self.fail {
            return Err(BpaError::Notification {
                message: "sns unavailable".to_owned(),
            });
        }
        Ok(())
    }
}
