use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::chat_model::{ChatModel, PromptMessage};
use crate::domain::repositories::{EmbeddingRepository, MessageRepository};

#[derive(Debug)]
pub enum SummarizerError {
    RepositoryError(String),
    ModelError(String),
}

impl std::fmt::Display for SummarizerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummarizerError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            SummarizerError::ModelError(msg) => write!(f, "Model error: {}", msg),
        }
    }
}

impl std::error::Error for SummarizerError {}

const SUMMARY_INSTRUCTIONS: &str = "You are an assistant that creates short, factual session \
summaries used for future context. Extract user goals, decisions, important facts, contact \
names, or constraints. Keep it concise (max 100 words).";

/// Compresses a session into a short rolling summary: the most recent
/// chat turns plus the most recently stored passages (documents and
/// prior chat alike), pushed through the LLM with a fixed instruction.
/// A session with no messages yet has nothing to summarize and resolves
/// to `None` without a model call.
pub struct SessionSummarizer {
    message_repository: Arc<dyn MessageRepository>,
    embedding_repository: Arc<dyn EmbeddingRepository>,
    chat_model: Arc<dyn ChatModel>,
    message_window: i64,
    passage_window: i64,
}

impl SessionSummarizer {
    pub fn new(
        message_repository: Arc<dyn MessageRepository>,
        embedding_repository: Arc<dyn EmbeddingRepository>,
        chat_model: Arc<dyn ChatModel>,
        message_window: i64,
        passage_window: i64,
    ) -> Self {
        Self {
            message_repository,
            embedding_repository,
            chat_model,
            message_window,
            passage_window,
        }
    }

    pub async fn summarize(&self, session_id: Uuid) -> Result<Option<String>, SummarizerError> {
        let recent = self
            .message_repository
            .find_recent(session_id, self.message_window)
            .await
            .map_err(|e| SummarizerError::RepositoryError(e.to_string()))?;

        if recent.is_empty() {
            return Ok(None);
        }

        // Fetched newest-first; the prompt reads oldest-first.
        let transcript = recent
            .iter()
            .rev()
            .map(|m| m.transcript_line())
            .collect::<Vec<_>>()
            .join("\n");

        let passages = self
            .embedding_repository
            .find_recent(session_id, self.passage_window)
            .await
            .map_err(|e| SummarizerError::RepositoryError(e.to_string()))?;
        let excerpts = passages
            .iter()
            .map(|p| p.content())
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = vec![
            PromptMessage::system(SUMMARY_INSTRUCTIONS),
            PromptMessage::user(format!(
                "Here are recent messages:\n\n{}\n\nHere are other relevant excerpts:\n\n{}\n\n\
                 Create a brief session summary (bullet points or short paragraphs).",
                transcript, excerpts
            )),
        ];

        let summary = self
            .chat_model
            .complete(&prompt, &[])
            .await
            .map_err(|e| SummarizerError::ModelError(e.to_string()))?;

        Ok(Some(summary.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::chat_model::{ChatModelError, ToolSpec};
    use crate::domain::entities::{ChatMessage, EmbeddingRecord};
    use crate::domain::repositories::embedding_repository::{
        EmbeddingRepositoryError, RetrievedPassage,
    };
    use crate::domain::repositories::message_repository::{MessageRepositoryError, MessageSort};
    use crate::domain::value_objects::MessageRole;
    use async_trait::async_trait;
    use pgvector::Vector;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedMessages {
        messages: Vec<ChatMessage>,
    }

    #[async_trait]
    impl MessageRepository for CannedMessages {
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
            limit: i64,
        ) -> Result<Vec<ChatMessage>, MessageRepositoryError> {
            Ok(self.messages.iter().take(limit as usize).cloned().collect())
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

    struct CannedEmbeddings {
        records: Vec<EmbeddingRecord>,
    }

    #[async_trait]
    impl EmbeddingRepository for CannedEmbeddings {
        async fn search_similar(
            &self,
            _session_id: Uuid,
            _query: &Vector,
            _limit: i64,
        ) -> Result<Vec<RetrievedPassage>, EmbeddingRepositoryError> {
            Ok(Vec::new())
        }

        async fn find_recent(
            &self,
            _session_id: Uuid,
            _limit: i64,
        ) -> Result<Vec<EmbeddingRecord>, EmbeddingRepositoryError> {
            Ok(self.records.clone())
        }
    }

    struct RecordingModel {
        calls: AtomicUsize,
        prompts: Mutex<Vec<Vec<PromptMessage>>>,
    }

    impl RecordingModel {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ChatModel for RecordingModel {
        async fn complete(
            &self,
            messages: &[PromptMessage],
            _tools: &[ToolSpec],
        ) -> Result<String, ChatModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(messages.to_vec());
            Ok("  the summary  ".to_string())
        }

        fn model_name(&self) -> &str {
            "recording-test-model"
        }
    }

    fn summarizer_with(
        messages: Vec<ChatMessage>,
        records: Vec<EmbeddingRecord>,
    ) -> (SessionSummarizer, Arc<RecordingModel>) {
        let model = Arc::new(RecordingModel::new());
        let summarizer = SessionSummarizer::new(
            Arc::new(CannedMessages { messages }),
            Arc::new(CannedEmbeddings { records }),
            model.clone(),
            6,
            40,
        );
        (summarizer, model)
    }

    fn message(role: MessageRole, content: &str) -> ChatMessage {
        ChatMessage::new(Uuid::new_v4(), None, role, content.to_string(), None)
    }

    #[tokio::test]
    async fn test_empty_history_skips_the_model() {
        let (summarizer, model) = summarizer_with(Vec::new(), Vec::new());

        let summary = summarizer.summarize(Uuid::new_v4()).await.unwrap();

        assert_eq!(summary, None);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_prompt_renders_history_oldest_first() {
        // Repository returns newest-first.
        let (summarizer, model) = summarizer_with(
            vec![
                message(MessageRole::Assistant, "Second answer"),
                message(MessageRole::User, "First question"),
            ],
            Vec::new(),
        );

        summarizer.summarize(Uuid::new_v4()).await.unwrap();

        let prompts = model.prompts.lock().unwrap();
        let body = &prompts[0][1].content;
        let first = body.find("User: First question").unwrap();
        let second = body.find("Assistant: Second answer").unwrap();
        assert!(first < second);
    }

    #[tokio::test]
    async fn test_summary_is_trimmed() {
        let (summarizer, _model) = summarizer_with(
            vec![message(MessageRole::User, "Hello")],
            vec![EmbeddingRecord::for_chat_message(
                Uuid::new_v4(),
                Uuid::new_v4(),
                "stored passage".to_string(),
                Vector::from(vec![0.0; 3]),
            )],
        );

        let summary = summarizer.summarize(Uuid::new_v4()).await.unwrap();

        assert_eq!(summary.as_deref(), Some("the summary"));
    }
}
