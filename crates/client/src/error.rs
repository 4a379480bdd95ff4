//! Structured failures surfaced to UI code.

use serde_json::Value;
use thiserror::Error;

use crate::transport::TransportError;

/// Status meaning "the access credential expired".
pub const UNAUTHORIZED: u16 = 401;

/// Coarse classification used by callers to pick a message or a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never produced a response.
    Transport,
    /// 401 that survived the refresh-and-retry cycle.
    Unauthorized,
    /// Any other 4xx (validation, not found, forbidden).
    Client,
    /// 5xx.
    Server,
    /// 2xx whose payload did not match the expected type.
    Decode,
}

/// Unrecoverable request failure: `{status, detail}`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] TransportError),

    #[error("API error ({status}): {}", describe(.detail))]
    Status { status: u16, detail: Value },

    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Error payload returned by the backend (empty object when it sent none).
    pub fn detail(&self) -> Option<&Value> {
        match self {
            ApiError::Status { detail, .. } => Some(detail),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::Status { status, .. } if *status == UNAUTHORIZED => ErrorKind::Unauthorized,
            ApiError::Status { status, .. } if *status >= 500 => ErrorKind::Server,
            ApiError::Status { .. } => ErrorKind::Client,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }

    /// Text suitable for an inline error message, shown verbatim.
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { status, detail } => {
                let text = describe(detail);
                if text.is_empty() {
                    format!("Request failed with status {status}")
                } else {
                    text
                }
            }
            other => other.to_string(),
        }
    }
}

/// Flatten a backend error payload into one line.
///
/// Understands `{"detail": "..."}`, field maps such as
/// `{"email": ["already registered"]}`, bare strings and string lists.
fn describe(detail: &Value) -> String {
    match detail {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(describe)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Value::Object(map) => {
            if let Some(text) = map.get("detail").map(describe).filter(|s| !s.is_empty()) {
                return text;
            }
            map.iter()
                .map(|(field, v)| (field, describe(v)))
                .filter(|(_, text)| !text.is_empty())
                .map(|(field, text)| {
                    if field == "non_field_errors" {
                        text
                    } else {
                        format!("{field}: {text}")
                    }
                })
                .collect::<Vec<_>>()
                .join("; ")
        }
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(status: u16, detail: Value) -> ApiError {
        ApiError::Status { status, detail }
    }

    #[test]
    fn kinds_follow_status_classes() {
        assert_eq!(status(401, json!({})).kind(), ErrorKind::Unauthorized);
        assert_eq!(status(403, json!({})).kind(), ErrorKind::Client);
        assert_eq!(status(404, json!({})).kind(), ErrorKind::Client);
        assert_eq!(status(502, json!({})).kind(), ErrorKind::Server);
        assert_eq!(
            ApiError::Transport(TransportError::Timeout).kind(),
            ErrorKind::Transport
        );
        assert_eq!(ApiError::Transport(TransportError::Timeout).status(), None);
    }

    #[test]
    fn detail_text_is_preferred() {
        let err = status(400, json!({"detail": "Invoice already paid."}));
        assert_eq!(err.message(), "Invoice already paid.");
    }

    #[test]
    fn field_errors_are_flattened() {
        let err = status(
            400,
            json!({"email": ["This field is required."], "non_field_errors": ["Bad input."]}),
        );
        let msg = err.message();
        assert!(msg.contains("email: This field is required."));
        assert!(msg.contains("Bad input."));
        assert!(!msg.contains("non_field_errors"));
    }

    #[test]
    fn empty_payload_falls_back_to_status() {
        assert_eq!(status(500, json!({})).message(), "Request failed with status 500");
    }
}
