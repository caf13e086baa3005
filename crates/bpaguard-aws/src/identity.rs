//! Caller identity via STS.

use anyhow::anyhow;
use async_trait::async_trait;
use aws_sdk_sts::Client as StsClient;
use bpaguard_core::{AccountId, BpaError, BpaResult, IdentityResolver};

/// [`IdentityResolver`] backed by STS `GetCallerIdentity`.
///
/// Identity resolution failing fails the whole operation; there is no
/// meaningful reconciliation without knowing the account.
#[derive(Debug, Clone)]
pub struct StsIdentityResolver {
    client: StsClient,
}

impl StsIdentityResolver {
    /// Create a resolver from the shared SDK configuration.
    #[must_use]
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: StsClient::new(config),
        }
    }
}

#[async_trait]
impl IdentityResolver for StsIdentityResolver {
    async fn current_account_id(&self) -> BpaResult<AccountId> {
        let output = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|err| BpaError::Internal(anyhow!("STS GetCallerIdentity failed: {err}")))?;

        let account = output.account().ok_or_else(|| {
            BpaError::Internal(anyhow!("STS GetCallerIdentity response missing account id"))
        })?;

        AccountId::new(account)
    }
}
