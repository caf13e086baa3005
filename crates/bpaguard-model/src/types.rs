//! Shared wire types.

/// The four account-level public access block flags as they appear on the
/// wire, in both response data and SNS notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicAccessFlags {
    /// Block new public ACLs and uploads with public ACLs.
    pub block_public_acls: bool,
    /// Ignore all public ACLs on buckets and objects.
    pub ignore_public_acls: bool,
    /// Block new public bucket policies.
    pub block_public_policy: bool,
    /// Restrict access to buckets with public policies.
    pub restrict_public_buckets: bool,
}
