use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::chat_model::PromptMessage;
use crate::application::services::embedding_gateway::EmbeddingGateway;
use crate::application::services::summarizer::SessionSummarizer;
use crate::domain::repositories::EmbeddingRepository;
use crate::domain::repositories::embedding_repository::RetrievedPassage;

#[derive(Debug)]
pub enum ContextAssemblyError {
    EmbeddingError(String),
    RetrievalError(String),
}

impl std::fmt::Display for ContextAssemblyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextAssemblyError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            ContextAssemblyError::RetrievalError(msg) => write!(f, "Retrieval error: {}", msg),
        }
    }
}

impl std::error::Error for ContextAssemblyError {}

const SYSTEM_INSTRUCTIONS: &str = "You are AIKA, short for AI Knowledge Assistant — an expert, \
friendly, and helpful assistant with tools capabilities.
Special capabilities:
- You can use tools to answer the user's question.
- You can retrieve relevant context from the session.
- You can process text files uploaded by the user.

Thought:

1. Analyze the user's question and determine if it requires using a tool.
2. If a tool is needed, explain why you will use it and ask for user confirmation before using it.
3. If a tool is not needed, proceed with answering the user's question.

Follow these rules:

1. Use the session summary and retrieved context to answer the user's question.
2. If key context is missing, ask short clarifying questions first.
3. Be concise, accurate, and friendly.
4. Avoid using tools unless absolutely necessary.
5. Never provide irrelevant information.
6. Limit your answer to a single message, max 2 sentences.
7. Never provide code.";

/// Builds the ordered prompt for one chat turn. The order is fixed and
/// load-bearing, establishing recency and priority for the model:
/// system instructions, then the session summary (if any), then the
/// retrieved passages (if any) as a single segment, then the new user
/// message as the final turn. Omitted segments leave no gaps.
pub struct ContextAssembler {
    embedding_gateway: Arc<EmbeddingGateway>,
    embedding_repository: Arc<dyn EmbeddingRepository>,
    summarizer: Arc<SessionSummarizer>,
    retrieval_limit: i64,
}

impl ContextAssembler {
    pub fn new(
        embedding_gateway: Arc<EmbeddingGateway>,
        embedding_repository: Arc<dyn EmbeddingRepository>,
        summarizer: Arc<SessionSummarizer>,
        retrieval_limit: i64,
    ) -> Self {
        Self {
            embedding_gateway,
            embedding_repository,
            summarizer,
            retrieval_limit,
        }
    }

    pub async fn build_context(
        &self,
        session_id: Uuid,
        user_message: &str,
    ) -> Result<Vec<PromptMessage>, ContextAssemblyError> {
        let mut messages = vec![PromptMessage::system(SYSTEM_INSTRUCTIONS)];

        // Summarization is best-effort: a failed summary degrades the
        // turn to "no summary" instead of failing it.
        match self.summarizer.summarize(session_id).await {
            Ok(Some(summary)) => {
                messages.push(PromptMessage::system(format!(
                    "Session summary:\n{}",
                    summary
                )));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(%session_id, error = %e, "Summarization failed, continuing without summary");
            }
        }

        let retrieved = self.retrieve_relevant_context(session_id, user_message).await?;
        if !retrieved.is_empty() {
            let joined = retrieved
                .iter()
                .map(|p| format!("{}: {}", p.content_kind.prompt_tag(), p.content))
                .collect::<Vec<_>>()
                .join("\n\n");
            messages.push(PromptMessage::system(format!(
                "Relevant context:\n{}",
                joined
            )));
        }

        messages.push(PromptMessage::user(user_message));

        Ok(messages)
    }

    async fn retrieve_relevant_context(
        &self,
        session_id: Uuid,
        query: &str,
    ) -> Result<Vec<RetrievedPassage>, ContextAssemblyError> {
        let query_vector = self
            .embedding_gateway
            .embed(query)
            .await
            .map_err(|e| ContextAssemblyError::EmbeddingError(e.to_string()))?;

        self.embedding_repository
            .search_similar(session_id, &query_vector, self.retrieval_limit)
            .await
            .map_err(|e| ContextAssemblyError::RetrievalError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::chat_model::{
        ChatModel, ChatModelError, PromptRole, ToolSpec,
    };
    use crate::application::ports::embedding_provider::{
        EmbeddingProvider, EmbeddingProviderError,
    };
    use crate::domain::entities::{ChatMessage, EmbeddingRecord};
    use crate::domain::repositories::MessageRepository;
    use crate::domain::repositories::embedding_repository::EmbeddingRepositoryError;
    use crate::domain::repositories::message_repository::{MessageRepositoryError, MessageSort};
    use crate::domain::value_objects::{ContentKind, MessageRole};
    use async_trait::async_trait;
    use pgvector::Vector;

    struct StubProvider;

    #[async_trait]
    impl EmbeddingProvider for StubProvider {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
            Ok(vec![0.1, 0.2, 0.3])
        }

        fn model_name(&self) -> &str {
            "stub-test-model"
        }
    }

    struct StubModel;

    #[async_trait]
    impl ChatModel for StubModel {
        async fn complete(
            &self,
            _messages: &[PromptMessage],
            _tools: &[ToolSpec],
        ) -> Result<String, ChatModelError> {
            Ok("a compact summary".to_string())
        }

        fn model_name(&self) -> &str {
            "stub-test-model"
        }
    }

    struct CannedHistory {
        messages: Vec<ChatMessage>,
    }

    #[async_trait]
    impl MessageRepository for CannedHistory {
        async fn save_with_embedding(
            &self,
            _message: &ChatMessage,
            _embedding: &EmbeddingRecord,
        ) -> Result<(), MessageRepositoryError> {
            Ok(())
        }

        async fn find_recent(
            &self,
            _session_id: Uuid,
            _limit: i64,
        ) -> Result<Vec<ChatMessage>, MessageRepositoryError> {
            Ok(self.messages.clone())
        }

        async fn find_by_session(
            &self,
            _session_id: Uuid,
            _sort: MessageSort,
            _limit: i64,
            _offset: i64,
        ) -> Result<Vec<ChatMessage>, MessageRepositoryError> {
            Ok(self.messages.clone())
        }
    }

    struct CannedSearch {
        passages: Vec<RetrievedPassage>,
    }

    #[async_trait]
    impl EmbeddingRepository for CannedSearch {
        async fn search_similar(
            &self,
            _session_id: Uuid,
            _query: &Vector,
            _limit: i64,
        ) -> Result<Vec<RetrievedPassage>, EmbeddingRepositoryError> {
            Ok(self.passages.clone())
        }

        async fn find_recent(
            &self,
            _session_id: Uuid,
            _limit: i64,
        ) -> Result<Vec<EmbeddingRecord>, EmbeddingRepositoryError> {
            Ok(Vec::new())
        }
    }

    fn assembler_with(
        messages: Vec<ChatMessage>,
        passages: Vec<RetrievedPassage>,
    ) -> ContextAssembler {
        let gateway = Arc::new(EmbeddingGateway::new(Arc::new(StubProvider), 3));
        let search: Arc<dyn EmbeddingRepository> = Arc::new(CannedSearch { passages });
        let summarizer = Arc::new(SessionSummarizer::new(
            Arc::new(CannedHistory { messages }),
            search.clone(),
            Arc::new(StubModel),
            6,
            40,
        ));
        ContextAssembler::new(gateway, search, summarizer, 5)
    }

    fn passage(kind: ContentKind, content: &str) -> RetrievedPassage {
        RetrievedPassage {
            content: content.to_string(),
            content_kind: kind,
            source_id: Uuid::new_v4(),
            similarity: 0.9,
        }
    }

    #[tokio::test]
    async fn test_empty_session_yields_system_then_user_only() {
        let assembler = assembler_with(Vec::new(), Vec::new());

        let context = assembler
            .build_context(Uuid::new_v4(), "What is in the report?")
            .await
            .unwrap();

        assert_eq!(context.len(), 2);
        assert_eq!(context[0].role, PromptRole::System);
        assert_eq!(context[1].role, PromptRole::User);
        assert_eq!(context[1].content, "What is in the report?");
    }

    #[tokio::test]
    async fn test_full_context_order_is_fixed() {
        let history = vec![ChatMessage::new(
            Uuid::new_v4(),
            None,
            MessageRole::User,
            "earlier question".to_string(),
            None,
        )];
        let assembler = assembler_with(
            history,
            vec![
                passage(ContentKind::File, "from the report"),
                passage(ContentKind::Chat, "from an earlier turn"),
            ],
        );

        let context = assembler
            .build_context(Uuid::new_v4(), "And the conclusion?")
            .await
            .unwrap();

        assert_eq!(context.len(), 4);
        assert!(context[1].content.starts_with("Session summary:\n"));
        assert!(context[2].content.starts_with("Relevant context:\n"));
        assert_eq!(context[3].role, PromptRole::User);
    }

    #[tokio::test]
    async fn test_retrieved_passages_join_into_one_tagged_segment() {
        let history = vec![ChatMessage::new(
            Uuid::new_v4(),
            None,
            MessageRole::User,
            "earlier".to_string(),
            None,
        )];
        let assembler = assembler_with(
            history,
            vec![
                passage(ContentKind::File, "alpha"),
                passage(ContentKind::Chat, "beta"),
            ],
        );

        let context = assembler
            .build_context(Uuid::new_v4(), "question")
            .await
            .unwrap();

        let segment = &context[2].content;
        assert_eq!(
            segment,
            "Relevant context:\nFILE: alpha\n\nCHAT: beta"
        );
    }
}
