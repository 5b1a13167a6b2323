use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ChatModelError {
    NetworkError(String),
    ApiError(String),
    ParseError(String),
    Timeout(String),
    EmptyResponse,
}

impl std::fmt::Display for ChatModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatModelError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ChatModelError::ApiError(msg) => write!(f, "API error: {}", msg),
            ChatModelError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ChatModelError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            ChatModelError::EmptyResponse => write!(f, "Model returned an empty response"),
        }
    }
}

impl std::error::Error for ChatModelError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

/// One role-tagged segment of an assembled prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::Assistant,
            content: content.into(),
        }
    }
}

/// A capability the orchestrator may explicitly grant to the model for
/// one conversation. No tools are ever passed implicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool's arguments.
    pub parameters: serde_json::Value,
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one completion over the assembled messages and return the
    /// final message's text content. `tools` is the explicit grant set;
    /// empty means the model gets no tools.
    async fn complete(
        &self,
        messages: &[PromptMessage],
        tools: &[ToolSpec],
    ) -> Result<String, ChatModelError>;

    fn model_name(&self) -> &str;
}
