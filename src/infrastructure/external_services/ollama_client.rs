use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::chat_model::{
    ChatModel, ChatModelError, PromptMessage, ToolSpec,
};
use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};

#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub chat_timeout_secs: u64,
    pub embedding_timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            chat_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2:1b".to_string()),
            embedding_model: env::var("OLLAMA_EMBEDDING_MODEL")
                .unwrap_or_else(|_| "nomic-embed-text".to_string()),
            chat_timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(120),
            embedding_timeout_secs: env::var("EMBEDDING_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }
}

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<OllamaTool<'a>>,
}

#[derive(Serialize)]
struct OllamaTool<'a> {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: OllamaFunction<'a>,
}

#[derive(Serialize)]
struct OllamaFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// HTTP client for a local Ollama instance, serving both capabilities
/// the backend consumes: text embedding and chat completion. Every call
/// carries an explicit per-request deadline so a stalled model cannot
/// hang a turn. No automatic retries; failures surface to the caller.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Client,
    config: OllamaConfig,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, reqwest::Error> {
        Self::new(OllamaConfig::default())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
        let request = EmbeddingsRequest {
            model: &self.config.embedding_model,
            prompt: text,
        };

        let response = self
            .client
            .post(self.endpoint("/api/embeddings"))
            .timeout(Duration::from_secs(self.config.embedding_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingProviderError::Timeout(e.to_string())
                } else {
                    EmbeddingProviderError::NetworkError(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(EmbeddingProviderError::ApiError(format!(
                "Embedding request failed with status {}",
                response.status()
            )));
        }

        let body: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingProviderError::ParseError(e.to_string()))?;

        Ok(body.embedding)
    }

    fn model_name(&self) -> &str {
        &self.config.embedding_model
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    async fn complete(
        &self,
        messages: &[PromptMessage],
        tools: &[ToolSpec],
    ) -> Result<String, ChatModelError> {
        let tools: Vec<OllamaTool> = tools
            .iter()
            .map(|tool| OllamaTool {
                tool_type: "function",
                function: OllamaFunction {
                    name: &tool.name,
                    description: &tool.description,
                    parameters: &tool.parameters,
                },
            })
            .collect();

        let request = ChatRequest {
            model: &self.config.chat_model,
            messages,
            stream: false,
            tools,
        };

        let response = self
            .client
            .post(self.endpoint("/api/chat"))
            .timeout(Duration::from_secs(self.config.chat_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatModelError::Timeout(e.to_string())
                } else {
                    ChatModelError::NetworkError(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(ChatModelError::ApiError(format!(
                "Chat request failed with status {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChatModelError::ParseError(e.to_string()))?;

        if body.message.content.trim().is_empty() {
            return Err(ChatModelError::EmptyResponse);
        }

        Ok(body.message.content)
    }

    fn model_name(&self) -> &str {
        &self.config.chat_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::chat_model::PromptRole;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = OllamaClient::new(OllamaConfig {
            base_url: "http://localhost:11434/".to_string(),
            chat_model: "llama3.2:1b".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            chat_timeout_secs: 1,
            embedding_timeout_secs: 1,
        })
        .unwrap();

        assert_eq!(
            client.endpoint("/api/chat"),
            "http://localhost:11434/api/chat"
        );
    }

    #[test]
    fn test_chat_request_serializes_roles_lowercase_and_omits_empty_tools() {
        let messages = vec![
            PromptMessage::system("instructions"),
            PromptMessage::user("question"),
        ];
        let request = ChatRequest {
            model: "llama3.2:1b",
            messages: &messages,
            stream: false,
            tools: Vec::new(),
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert!(json.get("tools").is_none());
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_granted_tools_serialize_as_functions() {
        let messages = vec![PromptMessage::user("question")];
        let parameters = serde_json::json!({"type": "object", "properties": {}});
        let spec = ToolSpec {
            name: "document_lookup".to_string(),
            description: "Read a stored document".to_string(),
            parameters: parameters.clone(),
        };
        let request = ChatRequest {
            model: "llama3.2:1b",
            messages: &messages,
            stream: false,
            tools: vec![OllamaTool {
                tool_type: "function",
                function: OllamaFunction {
                    name: &spec.name,
                    description: &spec.description,
                    parameters: &spec.parameters,
                },
            }],
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["tools"][0]["type"], "function");
        assert_eq!(json["tools"][0]["function"]["name"], "document_lookup");
        assert_eq!(json["tools"][0]["function"]["parameters"], parameters);
    }

    #[test]
    fn test_prompt_roles_cover_the_wire_values() {
        for (role, expected) in [
            (PromptRole::System, "\"system\""),
            (PromptRole::User, "\"user\""),
            (PromptRole::Assistant, "\"assistant\""),
        ] {
            assert_eq!(serde_json::to_string(&role).unwrap(), expected);
        }
    }
}
