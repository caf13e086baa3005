//! Outcome notifications via SNS.

use async_trait::async_trait;
use aws_sdk_sns::Client as SnsClient;
use aws_sdk_sns::error::ProvideErrorMetadata;
use bpaguard_core::{BpaError, BpaResult, OutcomeNotifier};
use bpaguard_model::OutcomeNotification;
use tracing::debug;

use crate::sdk::error_text;

/// [`OutcomeNotifier`] backed by SNS `Publish`.
///
/// Errors are returned as [`BpaError::Notification`]; the dispatcher logs
/// and swallows them, so a broken topic never fails the reconciliation.
#[derive(Debug, Clone)]
pub struct SnsNotifier {
    client: SnsClient,
}

impl SnsNotifier {
    /// Create a notifier from the shared SDK configuration.
    #[must_use]
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: SnsClient::new(config),
        }
    }
}

#[async_trait]
impl OutcomeNotifier for SnsNotifier {
    async fn publish(&self, topic_arn: &str, notification: &OutcomeNotification) -> BpaResult<()> {
        let body = serde_json::to_string_pretty(notification).map_err(|err| {
            BpaError::Notification {
                message: format!("failed to encode notification payload: {err}"),
            }
        })?;

        self.client
            .publish()
            .topic_arn(topic_arn)
            .subject(notification.subject())
            .message(body)
            .send()
            .await
            .map_err(|err| {
                let service_err = err.into_service_error();
                BpaError::Notification {
                    message: error_text(service_err.code(), service_err.message()),
                }
            })?;

        debug!(topic_arn = %topic_arn, "sns publish completed");
        Ok(())
    }
}
