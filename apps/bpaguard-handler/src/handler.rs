//! Per-invocation request handling.

use bpaguard_aws::{ResponseSender, S3ControlConfigStore, SnsNotifier, StsIdentityResolver};
use bpaguard_core::Dispatcher;
use bpaguard_model::CustomResourceRequest;
use lambda_runtime::{Error, LambdaEvent};
use tracing::error;

/// The dispatcher wired to the real AWS collaborators.
pub(crate) type AwsDispatcher = Dispatcher<StsIdentityResolver, S3ControlConfigStore, SnsNotifier>;

/// Handle one custom-resource event to completion.
///
/// Dispatch never errors (failures are folded into a FAILED response
/// document), and a delivery failure is only logged: the callback URL is
/// the single channel back to CloudFormation, so returning an error to the
/// runtime would change nothing for the stack operation.
pub(crate) async fn handle(
    event: LambdaEvent<CustomResourceRequest>,
    dispatcher: &AwsDispatcher,
    sender: &ResponseSender,
) -> Result<(), Error> {
    let request = event.payload;

    let response = dispatcher.dispatch(&request).await;

    if let Err(err) = sender.send(&request.response_url, &response).await {
        error!(
            request_id = %request.request_id,
            error = %err,
            "failed to deliver response document"
        );
    }

    Ok(())
}
