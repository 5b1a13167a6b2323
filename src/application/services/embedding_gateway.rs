use pgvector::Vector;
use std::sync::Arc;

use crate::application::ports::EmbeddingProvider;

#[derive(Debug)]
pub enum EmbeddingGatewayError {
    ProviderError(String),
    ValidationError(String),
}

impl std::fmt::Display for EmbeddingGatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingGatewayError::ProviderError(msg) => write!(f, "Provider error: {}", msg),
            EmbeddingGatewayError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for EmbeddingGatewayError {}

/// Wraps the embedding capability and pins every vector to the configured
/// dimension so all stored rows stay comparable under one distance
/// operator, whatever model version produced them. Longer output is
/// truncated, shorter output right-padded with zeros. A provider failure
/// is surfaced as-is; callers abort the ingestion or turn rather than
/// substituting a zero vector.
pub struct EmbeddingGateway {
    provider: Arc<dyn EmbeddingProvider>,
    dimension: usize,
}

impl EmbeddingGateway {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, dimension: usize) -> Self {
        Self {
            provider,
            dimension,
        }
    }

    pub async fn embed(&self, text: &str) -> Result<Vector, EmbeddingGatewayError> {
        if text.trim().is_empty() {
            return Err(EmbeddingGatewayError::ValidationError(
                "Cannot embed empty text".to_string(),
            ));
        }

        let raw = self
            .provider
            .embed(text)
            .await
            .map_err(|e| EmbeddingGatewayError::ProviderError(e.to_string()))?;

        Ok(Vector::from(self.normalize_dimension(raw)))
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    fn normalize_dimension(&self, mut components: Vec<f32>) -> Vec<f32> {
        if components.len() > self.dimension {
            components.truncate(self.dimension);
        } else if components.len() < self.dimension {
            components.resize(self.dimension, 0.0);
        }
        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::embedding_provider::EmbeddingProviderError;
    use async_trait::async_trait;

    struct FixedProvider {
        output: Vec<f32>,
    }

    #[async_trait]
    impl EmbeddingProvider for FixedProvider {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
            Ok(self.output.clone())
        }

        fn model_name(&self) -> &str {
            "fixed-test-model"
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl EmbeddingProvider for FailingProvider {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
            Err(EmbeddingProviderError::ApiError("boom".to_string()))
        }

        fn model_name(&self) -> &str {
            "failing-test-model"
        }
    }

    fn gateway_with(output: Vec<f32>, dimension: usize) -> EmbeddingGateway {
        EmbeddingGateway::new(Arc::new(FixedProvider { output }), dimension)
    }

    #[tokio::test]
    async fn test_longer_output_is_truncated() {
        let gateway = gateway_with(vec![1.0, 2.0, 3.0, 4.0, 5.0], 3);

        let vector = gateway.embed("hello").await.unwrap();

        assert_eq!(vector.as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[tokio::test]
    async fn test_shorter_output_is_zero_padded() {
        let gateway = gateway_with(vec![1.0, 2.0], 5);

        let vector = gateway.embed("hello").await.unwrap();

        assert_eq!(vector.as_slice(), &[1.0, 2.0, 0.0, 0.0, 0.0]);
    }

    #[tokio::test]
    async fn test_exact_output_passes_through() {
        let gateway = gateway_with(vec![0.5, -0.5, 0.25], 3);

        let vector = gateway.embed("hello").await.unwrap();

        assert_eq!(vector.as_slice(), &[0.5, -0.5, 0.25]);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let gateway = EmbeddingGateway::new(Arc::new(FailingProvider), 3);

        let result = gateway.embed("hello").await;

        assert!(matches!(
            result,
            Err(EmbeddingGatewayError::ProviderError(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_without_calling_provider() {
        let gateway = EmbeddingGateway::new(Arc::new(FailingProvider), 3);

        let result = gateway.embed("   ").await;

        assert!(matches!(
            result,
            Err(EmbeddingGatewayError::ValidationError(_))
        ));
    }
}
