//! Inbound custom-resource request types.

use std::fmt;

/// Lifecycle operation requested by CloudFormation.
///
/// Parsing is lenient: an unrecognized `RequestType` string deserializes to
/// [`RequestType::Unknown`] instead of failing the whole event, so the
/// handler can still deliver a FAILED response to the callback URL.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(from = "String")]
pub enum RequestType {
    /// The stack is creating the resource.
    Create,
    /// The stack is updating the resource.
    Update,
    /// The stack is deleting the resource.
    Delete,
    /// Any request kind this handler does not understand.
    Unknown(String),
}

impl From<String> for RequestType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Create" => Self::Create,
            "Update" => Self::Update,
            "Delete" => Self::Delete,
            _ => Self::Unknown(value),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("Create"),
            Self::Update => f.write_str("Update"),
            Self::Delete => f.write_str("Delete"),
            Self::Unknown(kind) => f.write_str(kind),
        }
    }
}

/// Properties declared on the custom resource in the template.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceProperties {
    /// The Lambda ARN CloudFormation invokes; echoed by the service, unused here.
    #[serde(default)]
    pub service_token: Option<String>,
    /// Optional SNS topic for outcome notifications.
    #[serde(default)]
    pub notification_topic_arn: Option<String>,
}

impl ResourceProperties {
    /// The notification topic, with an empty template parameter treated the
    /// same as an absent one.
    #[must_use]
    pub fn notification_topic(&self) -> Option<&str> {
        self.notification_topic_arn
            .as_deref()
            .filter(|arn| !arn.trim().is_empty())
    }
}

/// A custom-resource event as CloudFormation delivers it to the function.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceRequest {
    /// The lifecycle operation.
    pub request_type: RequestType,
    /// Presigned URL the response document must be PUT to.
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    /// ARN of the stack containing the resource.
    pub stack_id: String,
    /// Unique id for this request.
    pub request_id: String,
    /// Template-local name of the resource.
    pub logical_resource_id: String,
    /// Physical id from a previous operation (present on Update/Delete).
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    /// Resource properties from the template.
    #[serde(default)]
    pub resource_properties: ResourceProperties,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_event_json() -> &'static str {
        r#"{
            "RequestType": "Create",
            "ResponseURL": "https://cloudformation-custom-resource-response.s3.amazonaws.com/cb",
            "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/guard/uuid",
            "RequestId": "7d4d3f8c-0001",
            "ResourceType": "Custom::S3BlockPublicAccess",
            "LogicalResourceId": "S3BlockPublicAccess",
            "ResourceProperties": {
                "ServiceToken": "arn:aws:lambda:us-east-1:123456789012:function:guard",
                "NotificationTopicArn": "arn:aws:sns:us-east-1:123456789012:alerts"
            }
        }"#
    }

    #[test]
    fn test_should_deserialize_create_event() {
        let request: CustomResourceRequest = serde_json::from_str(create_event_json()).unwrap();

        assert_eq!(request.request_type, RequestType::Create);
        assert_eq!(
            request.response_url,
            "https://cloudformation-custom-resource-response.s3.amazonaws.com/cb"
        );
        assert_eq!(request.logical_resource_id, "S3BlockPublicAccess");
        assert_eq!(request.physical_resource_id, None);
        assert_eq!(
            request.resource_properties.notification_topic(),
            Some("arn:aws:sns:us-east-1:123456789012:alerts")
        );
    }

    #[test]
    fn test_should_deserialize_delete_event_with_physical_id() {
        let request: CustomResourceRequest = serde_json::from_str(
            r#"{
                "RequestType": "Delete",
                "ResponseURL": "https://example.com/cb",
                "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/guard/uuid",
                "RequestId": "7d4d3f8c-0002",
                "LogicalResourceId": "S3BlockPublicAccess",
                "PhysicalResourceId": "account-bpa-123456789012",
                "ResourceProperties": {}
            }"#,
        )
        .unwrap();

        assert_eq!(request.request_type, RequestType::Delete);
        assert_eq!(
            request.physical_resource_id.as_deref(),
            Some("account-bpa-123456789012")
        );
        assert_eq!(request.resource_properties.notification_topic(), None);
    }

    #[test]
    fn test_should_parse_unknown_request_type_leniently() {
        let request: CustomResourceRequest = serde_json::from_str(
            r#"{
                "RequestType": "Refresh",
                "ResponseURL": "https://example.com/cb",
                "StackId": "stack",
                "RequestId": "req",
                "LogicalResourceId": "res"
            }"#,
        )
        .unwrap();

        assert_eq!(request.request_type, RequestType::Unknown("Refresh".to_owned()));
        assert_eq!(request.request_type.to_string(), "Refresh");
    }

    #[test]
    fn test_should_treat_empty_notification_topic_as_absent() {
        let properties = ResourceProperties {
            service_token: None,
            notification_topic_arn: Some(String::new()),
        };
        assert_eq!(properties.notification_topic(), None);

        let properties = ResourceProperties {
            service_token: None,
            notification_topic_arn: Some("  ".to_owned()),
        };
        assert_eq!(properties.notification_topic(), None);
    }

    #[test]
    fn test_should_display_request_types() {
        assert_eq!(RequestType::Create.to_string(), "Create");
        assert_eq!(RequestType::Update.to_string(), "Update");
        assert_eq!(RequestType::Delete.to_string(), "Delete");
    }
}
