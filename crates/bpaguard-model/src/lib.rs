//! Wire model for the CloudFormation custom-resource protocol.
//!
//! This crate defines the typed request CloudFormation delivers to the
//! handler, the response document the handler must PUT back to the presigned
//! callback URL, and the JSON payload published to SNS when a notification
//! topic is configured. Field names follow the CloudFormation contract
//! (PascalCase, with the `ResponseURL` spelling quirk).

pub mod notification;
pub mod request;
pub mod response;
pub mod types;

pub use notification::{NotificationStatus, OutcomeNotification};
pub use request::{CustomResourceRequest, RequestType, ResourceProperties};
pub use response::{CustomResourceResponse, ResponseData, ResponseStatus};
pub use types::PublicAccessFlags;
