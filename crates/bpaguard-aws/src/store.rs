//! Account-level configuration via S3 Control.

use async_trait::async_trait;
use aws_sdk_s3control::Client as S3ControlClient;
use aws_sdk_s3control::error::ProvideErrorMetadata;
use aws_sdk_s3control::types::PublicAccessBlockConfiguration;
use bpaguard_core::{AccountConfigStore, AccountId, BpaConfiguration, BpaError, BpaResult};
use tracing::debug;

use crate::sdk::{error_text, is_access_denied};

/// [`AccountConfigStore`] backed by S3 Control
/// `GetPublicAccessBlock` / `PutPublicAccessBlock`.
#[derive(Debug, Clone)]
pub struct S3ControlConfigStore {
    client: S3ControlClient,
}

impl S3ControlConfigStore {
    /// Create a store from the shared SDK configuration.
    #[must_use]
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: S3ControlClient::new(config),
        }
    }
}

#[async_trait]
impl AccountConfigStore for S3ControlConfigStore {
    async fn fetch(&self, account_id: &AccountId) -> BpaResult<Option<BpaConfiguration>> {
        let result = self
            .client
            .get_public_access_block()
            .account_id(account_id.as_str())
            .send()
            .await;

        match result {
            Ok(output) => Ok(output.public_access_block_configuration().map(from_sdk)),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_public_access_block_configuration() {
                    debug!(account_id = %account_id, "no public access block configuration present");
                    return Ok(None);
                }
                if is_access_denied(service_err.code()) {
                    return Err(BpaError::AccessDenied {
                        operation: "GetPublicAccessBlock".to_owned(),
                    });
                }
                Err(BpaError::Fetch {
                    message: error_text(service_err.code(), service_err.message()),
                })
            }
        }
    }

    async fn apply(
        &self,
        account_id: &AccountId,
        configuration: BpaConfiguration,
    ) -> BpaResult<()> {
        self.client
            .put_public_access_block()
            .account_id(account_id.as_str())
            .public_access_block_configuration(to_sdk(configuration))
            .send()
            .await
            .map_err(|err| {
                let service_err = err.into_service_error();
                if is_access_denied(service_err.code()) {
                    BpaError::AccessDenied {
                        operation: "PutPublicAccessBlock".to_owned(),
                    }
                } else {
                    BpaError::Apply {
                        message: error_text(service_err.code(), service_err.message()),
                    }
                }
            })?;

        debug!(account_id = %account_id, "put_public_access_block completed");
        Ok(())
    }
}

/// Convert an SDK configuration into the domain value object.
///
/// A flag the service omits counts as enabled.
fn from_sdk(config: &PublicAccessBlockConfiguration) -> BpaConfiguration {
    BpaConfiguration {
        block_public_acls: config.block_public_acls().unwrap_or(true),
        ignore_public_acls: config.ignore_public_acls().unwrap_or(true),
        block_public_policy: config.block_public_policy().unwrap_or(true),
        restrict_public_buckets: config.restrict_public_buckets().unwrap_or(true),
    }
}

/// Convert the domain value object into the SDK request shape.
fn to_sdk(configuration: BpaConfiguration) -> PublicAccessBlockConfiguration {
    PublicAccessBlockConfiguration::builder()
        .block_public_acls(configuration.block_public_acls)
        .ignore_public_acls(configuration.ignore_public_acls)
        .block_public_policy(configuration.block_public_policy)
        .restrict_public_buckets(configuration.restrict_public_buckets)
        .build()
}
