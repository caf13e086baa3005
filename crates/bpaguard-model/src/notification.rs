//! SNS notification payload types.

use crate::types::PublicAccessFlags;

/// Outcome reported in a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationStatus {
    /// Reconciliation completed.
    Success,
    /// Reconciliation failed.
    Failed,
}

/// JSON body published to the configured SNS topic.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutcomeNotification {
    /// SUCCESS or FAILED.
    pub status: NotificationStatus,
    /// Outcome message, or the failure reason.
    pub message: String,
    /// Account the configuration applies to, when resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Configuration observed before the reconciliation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_configuration: Option<PublicAccessFlags>,
    /// Configuration in effect after the reconciliation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_configuration: Option<PublicAccessFlags>,
    /// Whether a write was performed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_changed: Option<bool>,
    /// RFC 3339 timestamp of the invocation.
    pub timestamp: String,
}

impl OutcomeNotification {
    /// Subject line for the SNS message.
    #[must_use]
    pub fn subject(&self) -> &'static str {
        match self.status {
            NotificationStatus::Success => "S3 Block Public Access - Configuration Applied",
            NotificationStatus::Failed => "S3 Block Public Access - Configuration Failed",
        }
    }
}
