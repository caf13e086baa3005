//! bpaguard handler - CloudFormation custom resource for account-level S3
//! Block Public Access.
//!
//! On stack Create the handler converges the account-level public access
//! block configuration on the fully-enabled state and optionally publishes
//! the outcome to SNS; Update and Delete succeed without side effects.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//! | `AWS_REGION` | `us-east-1` | Region the SDK clients target |
//! | `AWS_ENDPOINT_URL` | *(unset)* | Endpoint override for local AWS emulators |

mod config;
mod handler;

use anyhow::{Context, Result};
use aws_config::{BehaviorVersion, Region};
use bpaguard_aws::{ResponseSender, S3ControlConfigStore, SnsNotifier, StsIdentityResolver};
use bpaguard_core::Dispatcher;
use lambda_runtime::{run, service_fn};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::HandlerConfig;

/// Handler version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .without_time() // CloudWatch stamps each line already.
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let config = HandlerConfig::from_env();
    init_tracing(&config.log_level)?;

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.as_str().to_owned()));
    if let Some(endpoint_url) = &config.endpoint_url {
        info!(endpoint_url = %endpoint_url, "using endpoint override");
        loader = loader.endpoint_url(endpoint_url);
    }
    let sdk_config = loader.load().await;

    let dispatcher = Dispatcher::new(
        StsIdentityResolver::new(&sdk_config),
        S3ControlConfigStore::new(&sdk_config),
        SnsNotifier::new(&sdk_config),
        config.region.clone(),
    );
    let sender = ResponseSender::new();

    info!(region = %config.region, version = VERSION, "starting bpaguard handler");

    run(service_fn(|event| {
        handler::handle(event, &dispatcher, &sender)
    }))
    .await
}
