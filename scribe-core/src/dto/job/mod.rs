//! Job DTOs for backend communication

use serde::{Deserialize, Serialize};

/// Request to create a new documentation job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub repo_url: String,
}

impl JobRequest {
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
        }
    }
}

/// Error body returned by the backend on non-2xx responses
///
/// `detail` is usually a string, but validation failures may carry a
/// structured value instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Renders `detail` as a human-readable message, if present
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let body = serde_json::to_value(JobRequest::new("https://github.com/a/b")).unwrap();
        assert_eq!(body, serde_json::json!({ "repo_url": "https://github.com/a/b" }));
    }

    #[test]
    fn test_error_body_message() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"rate limited"}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some("rate limited"));

        let body: ErrorBody = serde_json::from_str(r#"{"other":1}"#).unwrap();
        assert_eq!(body.message(), None);

        let body: ErrorBody = serde_json::from_str(r#"{"detail":null}"#).unwrap();
        assert_eq!(body.message(), None);

        let body: ErrorBody = serde_json::from_str(r#"{"detail":[{"msg":"bad"}]}"#).unwrap();
        assert_eq!(body.message().as_deref(), Some(r#"[{"msg":"bad"}]"#));
    }
}
