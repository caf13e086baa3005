//! Helpers for interpreting AWS SDK service errors.

/// Whether an error code denotes a permission failure.
pub(crate) fn is_access_denied(code: Option<&str>) -> bool {
    matches!(code, Some("AccessDenied" | "AccessDeniedException"))
}

/// Combine an error code and message into one human-readable string.
pub(crate) fn error_text(code: Option<&str>, message: Option<&str>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_owned(),
        (None, Some(message)) => message.to_owned(),
        (None, None) => "unknown error".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_detect_access_denied_codes() {
        assert!(is_access_denied(Some("AccessDenied")));
        assert!(is_access_denied(Some("AccessDeniedException")));
        assert!(!is_access_denied(Some("ServiceUnavailable")));
        assert!(!is_access_denied(None));
    }

    #[test]
    fn test_should_format_error_text_from_available_parts() {
        assert_eq!(
            error_text(Some("Throttling"), Some("slow down")),
            "Throttling: slow down"
        );
        assert_eq!(error_text(Some("Throttling"), None), "Throttling");
        assert_eq!(error_text(None, Some("slow down")), "slow down");
        assert_eq!(error_text(None, None), "unknown error");
    }
}
