//! Error types for the reconciliation flow.

/// Error produced while handling a custom-resource request.
///
/// The variants mirror where in the flow a failure can originate. Only
/// fetch/apply/identity failures turn a Create into a FAILED response;
/// [`BpaError::Notification`] is logged and swallowed at its call site.
#[derive(Debug, thiserror::Error)]
pub enum BpaError {
    /// The event or its resource properties are malformed.
    #[error("invalid request: {message}")]
    Validation {
        /// Description of the malformed input.
        message: String,
    },

    /// The caller lacks permission for a public access block operation.
    #[error("access denied during {operation}")]
    AccessDenied {
        /// The API operation that was denied.
        operation: String,
    },

    /// Reading the current configuration failed.
    #[error("failed to read public access block configuration: {message}")]
    Fetch {
        /// Error text from the configuration store.
        message: String,
    },

    /// Writing the desired configuration failed.
    #[error("failed to write public access block configuration: {message}")]
    Apply {
        /// Error text from the configuration store.
        message: String,
    },

    /// Publishing the outcome notification failed. Never fatal.
    #[error("failed to publish notification: {message}")]
    Notification {
        /// Error text from the notification channel.
        message: String,
    },

    /// The event carried a request type this handler does not support.
    #[error("unsupported request type: {0}")]
    UnsupportedRequestType(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BpaError {
    /// The user-facing reason reported to CloudFormation stack events.
    ///
    /// Permission failures get a dedicated message so operators can tell a
    /// missing IAM grant apart from a generic API failure.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::AccessDenied { .. } => {
                "Insufficient permissions to modify S3 Block Public Access settings".to_owned()
            }
            Self::Fetch { message } | Self::Apply { message } => {
                format!("AWS API error: {message}")
            }
            Self::Validation { message } => format!("Invalid request: {message}"),
            Self::UnsupportedRequestType(kind) => format!("Unsupported request type: {kind}"),
            Self::Notification { .. } | Self::Internal(_) => format!("Internal error: {self}"),
        }
    }
}

/// Convenience result type for reconciliation operations.
pub type BpaResult<T> = Result<T, BpaError>;
