//! Per-invocation operation context.

use bpaguard_model::CustomResourceRequest;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::{AccountId, AwsRegion};

/// Identifiers and the timestamp for one custom-resource invocation.
///
/// Created fresh per request and never persisted; its only job is to shape
/// the response document and the notification payload, and to make both
/// report the same instant.
#[derive(Debug, Clone)]
pub struct OperationContext {
    /// Unique id of the request, echoed in the response.
    pub request_id: String,
    /// ARN of the originating stack, echoed in the response.
    pub stack_id: String,
    /// Template-local resource name, echoed in the response.
    pub logical_resource_id: String,
    /// Physical id from a previous lifecycle operation, if any.
    pub physical_resource_id: Option<String>,
    /// Region the handler is executing in.
    pub region: AwsRegion,
    /// Invocation time.
    pub timestamp: DateTime<Utc>,
}

impl OperationContext {
    /// Build the context for a request, stamping the current time.
    #[must_use]
    pub fn for_request(request: &CustomResourceRequest, region: AwsRegion) -> Self {
        Self {
            request_id: request.request_id.clone(),
            stack_id: request.stack_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
            physical_resource_id: request.physical_resource_id.clone(),
            region,
            timestamp: Utc::now(),
        }
    }

    /// The invocation timestamp as an RFC 3339 string.
    #[must_use]
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Deterministic physical resource id once the account is known.
    #[must_use]
    pub fn physical_id_for(&self, account_id: &AccountId) -> String {
        format!("account-bpa-{account_id}")
    }

    /// Physical resource id for paths where no account was resolved: echo
    /// the inbound id, or derive one from the request id.
    #[must_use]
    pub fn fallback_physical_id(&self) -> String {
        self.physical_resource_id
            .clone()
            .unwrap_or_else(|| format!("account-bpa-{}", self.request_id))
    }
}
