use clinical_session::{ChatTurn, Speaker};
use serde::{Deserialize, Serialize};

/// Speaker tag as the query service expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireSpeaker {
    User,
    Bot,
}

/// Over-the-wire shape of one prior turn: `{"type": "user", "content": "..."}`.
///
/// Kept separate from `ChatTurn` so display-only state never leaks into requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTurn {
    #[serde(rename = "type")]
    pub speaker: WireSpeaker,
    pub content: String,
}

impl From<&ChatTurn> for WireTurn {
    fn from(turn: &ChatTurn) -> Self {
        let speaker = match turn.speaker {
            Speaker::User => WireSpeaker::User,
            Speaker::Bot => WireSpeaker::Bot,
        };

        Self {
            speaker,
            content: turn.content.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub chat_history: Vec<WireTurn>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>, prior_transcript: &[ChatTurn]) -> Self {
        Self {
            query: query.into(),
            chat_history: prior_transcript.iter().map(WireTurn::from).collect(),
        }
    }
}

/// Successful reply body. Any extra fields the service adds are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_history_with_type_tags() {
        let history = [ChatTurn::user("Hello"), ChatTurn::bot("Hi there")];
        let request = QueryRequest::new("What next?", &history);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": "What next?",
                "chat_history": [
                    { "type": "user", "content": "Hello" },
                    { "type": "bot", "content": "Hi there" },
                ],
            })
        );
    }

    #[test]
    fn response_without_reply_field_is_rejected() {
        let missing = serde_json::from_str::<QueryResponse>(r#"{"answer":"nope"}"#);
        assert!(missing.is_err());

        let ok = serde_json::from_str::<QueryResponse>(r#"{"response":"yes","extra":1}"#).unwrap();
        assert_eq!(ok.response, "yes");
    }
}
