//! Account-level public access block configuration.

use bpaguard_model::PublicAccessFlags;

/// The four account-level Block Public Access flags.
///
/// Immutable value object; equality is flag-wise. An account with no
/// configuration at all is represented as [`BpaConfiguration::DISABLED`]
/// once fetched, so there is no partial or undefined state past the store
/// seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BpaConfiguration {
    /// Block new public ACLs and uploads with public ACLs.
    pub block_public_acls: bool,
    /// Ignore all public ACLs on buckets and objects.
    pub ignore_public_acls: bool,
    /// Block new public bucket policies.
    pub block_public_policy: bool,
    /// Restrict access to buckets with public policies.
    pub restrict_public_buckets: bool,
}

impl BpaConfiguration {
    /// No protection; the normalization of "not configured".
    pub const DISABLED: Self = Self {
        block_public_acls: false,
        ignore_public_acls: false,
        block_public_policy: false,
        restrict_public_buckets: false,
    };

    /// Full protection; the only configuration this handler ever writes.
    pub const ENABLED: Self = Self {
        block_public_acls: true,
        ignore_public_acls: true,
        block_public_policy: true,
        restrict_public_buckets: true,
    };

    /// Whether all four flags are enabled.
    #[must_use]
    pub fn is_fully_enabled(&self) -> bool {
        *self == Self::ENABLED
    }
}

impl Default for BpaConfiguration {
    fn default() -> Self {
        Self::DISABLED
    }
}

impl From<BpaConfiguration> for PublicAccessFlags {
    fn from(config: BpaConfiguration) -> Self {
        Self {
            block_public_acls: config.block_public_acls,
            ignore_public_acls: config.ignore_public_acls,
            block_public_policy: config.block_public_policy,
            restrict_public_buckets: config.restrict_public_buckets,
        }
    }
}

impl From<PublicAccessFlags> for BpaConfiguration {
    fn from(flags: PublicAccessFlags) -> Self {
        Self {
            block_public_acls: flags.block_public_acls,
            ignore_public_acls: flags.ignore_public_acls,
            block_public_policy: flags.block_public_policy,
            restrict_public_buckets: flags.restrict_public_buckets,
        }
    }
}
