use crate::domain::message::Message;
use serde::{Deserialize, Serialize};

/// Body of a create request. Any `id` sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: i64,
    pub text: String,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self { id: message.id, text: message.text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_ignores_id() {
        let req: CreateMessageRequest = serde_json::from_str(r#"{"id": 42, "text": "Hello World!"}"#).unwrap();
        assert_eq!(req.text.as_deref(), Some("Hello World!"));
    }

    #[test]
    fn test_create_request_tolerates_missing_text() {
        let req: CreateMessageRequest = serde_json::from_str("{}").unwrap();
        assert!(req.text.is_none());

        let req: CreateMessageRequest = serde_json::from_str(r#"{"text": null}"#).unwrap();
        assert!(req.text.is_none());
    }

    #[test]
    fn test_response_is_flat_object() {
        let body = serde_json::to_value(MessageResponse::from(Message { id: 7, text: "hi".to_string() })).unwrap();
        assert_eq!(body, serde_json::json!({ "id": 7, "text": "hi" }));
    }
}
