//! Outbound response document types.

use crate::types::PublicAccessFlags;

/// Terminal status reported back to CloudFormation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseStatus {
    /// The lifecycle operation succeeded.
    Success,
    /// The lifecycle operation failed; `Reason` explains why.
    Failed,
}

/// The `Data` attribute map of a response document.
///
/// A reconciled Create carries the resolved flags and a changed indicator;
/// the Update/Delete no-op paths carry only a message. The timestamp is
/// always present.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseData {
    /// Resolved public access block flags, when a reconciliation ran.
    #[serde(flatten)]
    pub configuration: Option<PublicAccessFlags>,
    /// Whether the reconciliation wrote a new configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_changed: Option<bool>,
    /// Human-readable note for no-op operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// RFC 3339 timestamp of the invocation.
    pub timestamp: String,
}

impl ResponseData {
    /// Data payload for a completed reconciliation.
    #[must_use]
    pub fn reconciled(configuration: PublicAccessFlags, changed: bool, timestamp: String) -> Self {
        Self {
            configuration: Some(configuration),
            configuration_changed: Some(changed),
            message: None,
            timestamp,
        }
    }

    /// Data payload for a no-op lifecycle operation.
    #[must_use]
    pub fn no_op(message: impl Into<String>, timestamp: String) -> Self {
        Self {
            configuration: None,
            configuration_changed: None,
            message: Some(message.into()),
            timestamp,
        }
    }
}

/// Response document delivered to the presigned callback URL.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceResponse {
    /// SUCCESS or FAILED.
    pub status: ResponseStatus,
    /// Human-readable explanation; CloudFormation surfaces it in stack events.
    pub reason: String,
    /// Stable identifier for the resource.
    pub physical_resource_id: String,
    /// Echoed from the request.
    pub stack_id: String,
    /// Echoed from the request.
    pub request_id: String,
    /// Echoed from the request.
    pub logical_resource_id: String,
    /// Optional attribute map readable via `Fn::GetAtt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}
