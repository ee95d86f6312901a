/// Failure of a single backend call, normalized at the client boundary.
///
/// `Display` yields the message controllers store in their `error` slots.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Malformed response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Build an HTTP error from a non-2xx body, preferring a `{"detail": ...}` payload.
    pub fn from_status(status: u16, reason: Option<&str>, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| match v.get("detail") {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(other) if !other.is_null() => Some(other.to_string()),
                _ => None,
            });
        let message = match detail {
            Some(d) => d,
            None if !body.trim().is_empty() => body.trim().to_string(),
            None => reason.unwrap_or("request failed").to_string(),
        };
        ApiError::Http { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Parse(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_payload_becomes_message() {
        let err = ApiError::from_status(404, Some("Not Found"), r#"{"detail":"no such file"}"#);
        assert_eq!(err.to_string(), "HTTP 404: no such file");
    }

    #[test]
    fn plain_body_is_trimmed() {
        let err = ApiError::from_status(500, Some("Internal Server Error"), "  boom \n");
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn empty_body_uses_reason() {
        let err = ApiError::from_status(502, Some("Bad Gateway"), "");
        assert_eq!(
            err,
            ApiError::Http {
                status: 502,
                message: "Bad Gateway".into()
            }
        );
    }
}
