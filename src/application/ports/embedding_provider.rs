use async_trait::async_trait;

#[derive(Debug)]
pub enum EmbeddingProviderError {
    NetworkError(String),
    ApiError(String),
    ParseError(String),
    Timeout(String),
}

impl std::fmt::Display for EmbeddingProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProviderError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            EmbeddingProviderError::ApiError(msg) => write!(f, "API error: {}", msg),
            EmbeddingProviderError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            EmbeddingProviderError::Timeout(msg) => write!(f, "Timed out: {}", msg),
        }
    }
}

impl std::error::Error for EmbeddingProviderError {}

/// Raw text-to-vector capability. Output length is whatever the model
/// produces; dimension normalization is the gateway's job, not the
/// provider's.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError>;

    fn model_name(&self) -> &str;
}
