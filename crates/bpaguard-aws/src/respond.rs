//! Delivery of the response document to the CloudFormation callback URL.

use anyhow::anyhow;
use bpaguard_core::{BpaError, BpaResult};
use bpaguard_model::CustomResourceResponse;
use tracing::info;

/// PUTs the serialized response document to the presigned callback URL.
#[derive(Debug, Clone, Default)]
pub struct ResponseSender {
    http: reqwest::Client,
}

impl ResponseSender {
    /// Create a sender with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver the response document.
    ///
    /// The callback URL is the only channel back to CloudFormation, so a
    /// delivery failure can only be logged by the caller; the stack
    /// operation will eventually time out on its side.
    pub async fn send(
        &self,
        response_url: &str,
        response: &CustomResourceResponse,
    ) -> BpaResult<()> {
        let reply = self
            .http
            .put(response_url)
            .json(response)
            .send()
            .await
            .map_err(|err| {
                BpaError::Internal(anyhow!("failed to deliver response document: {err}"))
            })?;

        let status = reply.status();
        if !status.is_success() {
            return Err(BpaError::Internal(anyhow!(
                "response delivery rejected with status {status}"
            )));
        }

        info!(status = %status, "response document delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bpaguard_model::{ResponseData, ResponseStatus};
    use bpaguard_model::types::PublicAccessFlags;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn sample_response() -> CustomResourceResponse {
        CustomResourceResponse {
            status: ResponseStatus::Success,
            reason: "S3 Block Public Access fully enabled at account level".to_owned(),
            physical_resource_id: "account-bpa-123456789012".to_owned(),
            stack_id: "arn:aws:cloudformation:us-east-1:123456789012:stack/guard/uuid".to_owned(),
            request_id: "7d4d3f8c-0001".to_owned(),
            logical_resource_id: "S3BlockPublicAccess".to_owned(),
            data: Some(ResponseData::reconciled(
                PublicAccessFlags {
                    block_public_acls: true,
                    ignore_public_acls: true,
                    block_public_policy: true,
                    restrict_public_buckets: true,
                },
                true,
                "2026-01-01T00:00:00Z".to_owned(),
            )),
        }
    }

    #[tokio::test]
    async fn test_should_put_response_document_to_callback_url() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/cb"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let sender = ResponseSender::new();
        sender
            .send(&format!("{}/cb", server.uri()), &sample_response())
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["Status"], "SUCCESS");
        assert_eq!(body["PhysicalResourceId"], "account-bpa-123456789012");
        assert_eq!(body["Data"]["ConfigurationChanged"], true);
    }

    #[tokio::test]
    async fn test_should_report_rejected_delivery() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let sender = ResponseSender::new();
        let err = sender
            .send(&format!("{}/cb", server.uri()), &sample_response())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("403"));
    }
}
