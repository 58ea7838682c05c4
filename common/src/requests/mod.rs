use serde::{Deserialize, Serialize};

use crate::identifier::ResourceIdentifier;

/// Request payload for the roast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoastRequest {
    pub username: ResourceIdentifier,
}

/// Error body of a non-2xx response from the roast service.
///
/// FastAPI validation failures send `detail` as a list of objects; only a
/// plain string is treated as a message.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorDetail {
    /// Extracts a non-blank `detail` string from a raw response body.
    pub fn message_from_body(body: &str) -> Option<String> {
        let parsed: ErrorDetail = serde_json::from_str(body).ok()?;
        match parsed.detail? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ErrorDetail, RoastRequest};
    use crate::identifier::ResourceIdentifier;

    #[test]
    fn test_request_body_shape() {
        let request = RoastRequest {
            username: ResourceIdentifier::validate("octocat").unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "username": "octocat" })
        );
    }

    #[test]
    fn test_detail_extraction() {
        assert_eq!(
            ErrorDetail::message_from_body(r#"{"detail":"user not found"}"#).as_deref(),
            Some("user not found")
        );
        assert_eq!(ErrorDetail::message_from_body(r#"{"detail":"  "}"#), None);
        assert_eq!(ErrorDetail::message_from_body(r#"{"detail":[{"msg":"x"}]}"#), None);
        assert_eq!(ErrorDetail::message_from_body(r#"{"other":1}"#), None);
        assert_eq!(ErrorDetail::message_from_body("<html>502</html>"), None);
        assert_eq!(ErrorDetail::message_from_body(""), None);
    }
}
