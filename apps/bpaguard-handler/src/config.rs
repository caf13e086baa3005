//! Handler configuration.
//!
//! All configuration is driven by environment variables, matching Lambda
//! conventions.

use bpaguard_core::AwsRegion;

/// Runtime configuration for the handler.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Log level filter (overridden by `RUST_LOG` when set).
    pub log_level: String,
    /// Region the handler executes in.
    pub region: AwsRegion,
    /// Optional endpoint override for testing against a local AWS emulator.
    pub endpoint_url: Option<String>,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            region: AwsRegion::default(),
            endpoint_url: None,
        }
    }
}

impl HandlerConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Ok(v) = std::env::var("AWS_REGION") {
            config.region = AwsRegion::new(v);
        }
        if let Ok(v) = std::env::var("AWS_ENDPOINT_URL") {
            if !v.trim().is_empty() {
                config.endpoint_url = Some(v);
            }
        }

        config
    }
}
