//! Backend call errors and their user-facing messages.

/// Substring of a raw error message → message shown to the user.
///
/// Checked in order; `insufficient_quota` must win over `quota`.
const FRIENDLY_MESSAGES: [(&str, &str); 5] = [
    (
        "Failed to fetch",
        "Network connection failed. Please check your internet connection.",
    ),
    (
        "NetworkError",
        "Network error occurred. Please check your connection.",
    ),
    (
        "insufficient_quota",
        "API quota exhausted. Please upgrade your plan.",
    ),
    (
        "quota",
        "API quota exceeded. Please check your subscription plan.",
    ),
    ("timeout", "Request timed out. Please try again later."),
];

const UNEXPECTED: &str = "An unexpected error occurred";

/// Fallback message for a non-2xx status without an `error` field.
pub fn status_message(status: u16) -> &'static str {
    match status {
        400 => "Invalid request data",
        401 => "Authentication required",
        403 => "Permission denied",
        404 => "Endpoint not found",
        429 => "API request limit exceeded. Please wait before trying again.",
        500 => "Internal server error",
        _ => "Request failed",
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Network(String),
    /// Non-2xx response.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// 2xx response carrying an `error` or `warning` field.
    #[error("{0}")]
    Server(String),
    /// 2xx response whose body did not have the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for a toast or an inline error view.
    pub fn user_message(&self) -> String {
        let raw = self.to_string();
        if let Some((_, friendly)) = FRIENDLY_MESSAGES
            .iter()
            .find(|(needle, _)| raw.contains(needle))
        {
            return friendly.to_string();
        }
        if let Self::Network(_) = self {
            return FRIENDLY_MESSAGES[0].1.to_string();
        }
        let raw = raw.trim();
        if raw.is_empty() {
            UNEXPECTED.to_string()
        } else {
            raw.to_string()
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Network(format!("timeout: {err}"))
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_failures_map_to_connection_message() {
        let err = ApiError::Network("error sending request".into());
        assert_eq!(
            err.user_message(),
            "Network connection failed. Please check your internet connection."
        );
    }

    #[test]
    fn timeouts_map_to_timeout_message() {
        let err = ApiError::Network("timeout: operation timed out".into());
        assert_eq!(err.user_message(), "Request timed out. Please try again later.");
    }

    #[test]
    fn insufficient_quota_wins_over_quota() {
        let err = ApiError::Server("insufficient_quota: billing".into());
        assert_eq!(
            err.user_message(),
            "API quota exhausted. Please upgrade your plan."
        );
        let err = ApiError::Server("quota reached".into());
        assert_eq!(
            err.user_message(),
            "API quota exceeded. Please check your subscription plan."
        );
    }

    #[test]
    fn unmatched_messages_pass_through() {
        let err = ApiError::Status {
            status: 400,
            message: "Column contains no numbers".into(),
        };
        assert_eq!(err.user_message(), "Column contains no numbers");
        assert_eq!(ApiError::Server("  ".into()).user_message(), UNEXPECTED);
    }

    #[test]
    fn status_table() {
        assert_eq!(status_message(404), "Endpoint not found");
        assert_eq!(
            status_message(429),
            "API request limit exceeded. Please wait before trying again."
        );
        assert_eq!(status_message(502), "Request failed");
    }
}
