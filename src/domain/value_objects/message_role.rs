use serde::{Deserialize, Serialize};

/// Who authored a chat message. Only user and assistant turns are ever
/// persisted; system instructions exist solely inside assembled prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("Unknown message role: {}", other)),
        }
    }

    /// Speaker label used when rendering history for summarization.
    pub fn speaker_label(&self) -> &'static str {
        match self {
            MessageRole::User => "User",
            MessageRole::Assistant => "Assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        assert_eq!(MessageRole::parse("user").unwrap(), MessageRole::User);
        assert_eq!(
            MessageRole::parse("assistant").unwrap(),
            MessageRole::Assistant
        );
        assert!(MessageRole::parse("system").is_err());
    }

    #[test]
    fn test_speaker_labels() {
        assert_eq!(MessageRole::User.speaker_label(), "User");
        assert_eq!(MessageRole::Assistant.speaker_label(), "Assistant");
    }
}
