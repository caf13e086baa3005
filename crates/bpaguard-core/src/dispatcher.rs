//! Lifecycle dispatch and response formatting.
//!
//! Each request kind maps to a terminal SUCCESS or FAILED outcome: Create
//! runs the full reconciliation, Update and Delete are deliberate no-ops
//! (the account setting is treated as set-once, and is retained on stack
//! deletion for safety). Every path, including failures, produces exactly
//! one well-formed response document; an unformatted failure would leave
//! the stack operation hanging until CloudFormation's own timeout.

use bpaguard_model::{
    CustomResourceRequest, CustomResourceResponse, NotificationStatus, OutcomeNotification,
    RequestType, ResponseData, ResponseStatus,
};
use tracing::{error, info, warn};

use crate::context::OperationContext;
use crate::error::BpaError;
use crate::reconciler::{
    AccountConfigStore, IdentityResolver, OutcomeNotifier, ReconcileOutcome, Reconciler,
};
use crate::types::AwsRegion;

/// Gates the reconciler behind the custom-resource lifecycle.
#[derive(Debug, Clone)]
pub struct Dispatcher<I, S, N> {
    reconciler: Reconciler<I, S>,
    notifier: N,
    region: AwsRegion,
}

impl<I, S, N> Dispatcher<I, S, N>
where
    I: IdentityResolver,
    S: AccountConfigStore,
    N: OutcomeNotifier,
{
    /// Create a dispatcher over the given collaborators.
    pub fn new(identity: I, store: S, notifier: N, region: AwsRegion) -> Self {
        Self {
            reconciler: Reconciler::new(identity, store),
            notifier,
            region,
        }
    }

    /// Handle one request to completion.
    ///
    /// Never returns an error: failures are folded into a FAILED response
    /// document so the caller always has something to deliver.
    pub async fn dispatch(&self, request: &CustomResourceRequest) -> CustomResourceResponse {
        let ctx = OperationContext::for_request(request, self.region.clone());
        info!(
            request_type = %request.request_type,
            request_id = %ctx.request_id,
            logical_resource_id = %ctx.logical_resource_id,
            region = %ctx.region,
            "received custom resource request"
        );

        match &request.request_type {
            RequestType::Create => self.handle_create(request, &ctx).await,
            RequestType::Update | RequestType::Delete => Self::handle_no_op(request, &ctx),
            RequestType::Unknown(kind) => {
                let err = BpaError::UnsupportedRequestType(kind.clone());
                error!(request_type = %kind, "rejecting request");
                self.notify_failure(request, &ctx, &err).await;
                failure_response(&ctx, &err)
            }
        }
    }

    /// Run the reconciliation and report its outcome.
    async fn handle_create(
        &self,
        request: &CustomResourceRequest,
        ctx: &OperationContext,
    ) -> CustomResourceResponse {
        match self.reconciler.run().await {
            Ok(outcome) => {
                self.notify(request, &success_notification(&outcome, ctx)).await;
                success_response(&outcome, ctx)
            }
            Err(err) => {
                error!(error = %err, "reconciliation failed");
                self.notify_failure(request, ctx, &err).await;
                failure_response(ctx, &err)
            }
        }
    }

    /// Update and Delete succeed without touching the account configuration.
    fn handle_no_op(
        request: &CustomResourceRequest,
        ctx: &OperationContext,
    ) -> CustomResourceResponse {
        let kind = &request.request_type;
        info!(request_type = %kind, "no action needed, returning success");

        CustomResourceResponse {
            status: ResponseStatus::Success,
            reason: format!("{kind} operation completed"),
            physical_resource_id: ctx.fallback_physical_id(),
            stack_id: ctx.stack_id.clone(),
            request_id: ctx.request_id.clone(),
            logical_resource_id: ctx.logical_resource_id.clone(),
            data: Some(ResponseData::no_op(
                format!("{kind} operation completed - no changes made"),
                ctx.timestamp_rfc3339(),
            )),
        }
    }

    /// Publish a notification if a topic is configured. Publish failures are
    /// logged and swallowed; they never change the primary outcome.
    async fn notify(&self, request: &CustomResourceRequest, notification: &OutcomeNotification) {
        let Some(topic_arn) = request.resource_properties.notification_topic() else {
            return;
        };
        match self.notifier.publish(topic_arn, notification).await {
            Ok(()) => info!(topic_arn = %topic_arn, "outcome notification published"),
            Err(err) => {
                warn!(topic_arn = %topic_arn, error = %err, "failed to publish outcome notification");
            }
        }
    }

    async fn notify_failure(
        &self,
        request: &CustomResourceRequest,
        ctx: &OperationContext,
        err: &BpaError,
    ) {
        let notification = OutcomeNotification {
            status: NotificationStatus::Failed,
            message: err.reason(),
            account_id: None,
            previous_configuration: None,
            new_configuration: None,
            configuration_changed: None,
            timestamp: ctx.timestamp_rfc3339(),
        };
        self.notify(request, &notification).await;
    }
}

fn success_notification(
    outcome: &ReconcileOutcome,
    ctx: &OperationContext,
) -> OutcomeNotification {
    OutcomeNotification {
        status: NotificationStatus::Success,
        message: outcome.message().to_owned(),
        account_id: Some(outcome.account_id.to_string()),
        previous_configuration: Some(outcome.previous.into()),
        new_configuration: Some(outcome.current.into()),
        configuration_changed: Some(outcome.changed),
        timestamp: ctx.timestamp_rfc3339(),
    }
}

fn success_response(outcome: &ReconcileOutcome, ctx: &OperationContext) -> CustomResourceResponse {
    CustomResourceResponse {
        status: ResponseStatus::Success,
        reason: outcome.message().to_owned(),
        physical_resource_id: ctx.physical_id_for(&outcome.account_id),
        stack_id: ctx.stack_id.clone(),
        request_id: ctx.request_id.clone(),
        logical_resource_id: ctx.logical_resource_id.clone(),
        data: Some(ResponseData::reconciled(
            outcome.current.into(),
            outcome.changed,
            ctx.timestamp_rfc3339(),
        )),
    }
}

fn failure_response(ctx: &OperationContext, err: &BpaError) -> CustomResourceResponse {
    CustomResourceResponse {
        status: ResponseStatus::Failed,
        reason: err.reason(),
        physical_resource_id: ctx.fallback_physical_id(),
        stack_id: ctx.stack_id.clone(),
        request_id: ctx.request_id.clone(),
        logical_resource_id: ctx.logical_resource_id.clone(),
        data: None,
    }
}
