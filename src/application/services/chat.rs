use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::chat_model::{ChatModel, ToolSpec};
use crate::application::services::context_assembler::ContextAssembler;
use crate::application::services::embedding_gateway::EmbeddingGateway;
use crate::domain::entities::{ChatMessage, EmbeddingRecord};
use crate::domain::repositories::MessageRepository;
use crate::domain::value_objects::MessageRole;

#[derive(Debug)]
pub enum ChatError {
    ContextError(String),
    ModelError(String),
    EmbeddingError(String),
    PersistenceError(String),
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatError::ContextError(msg) => write!(f, "Context error: {}", msg),
            ChatError::ModelError(msg) => write!(f, "Model error: {}", msg),
            ChatError::EmbeddingError(msg) => write!(f, "Embedding error: {}", msg),
            ChatError::PersistenceError(msg) => write!(f, "Persistence error: {}", msg),
        }
    }
}

impl std::error::Error for ChatError {}

/// Drives one user turn end-to-end: assemble the prompt, invoke the
/// model, then persist the user and assistant messages. Persistence
/// happens strictly after a successful completion so a failed model call
/// never leaves an orphaned user turn without a reply. Tools reach the
/// model only through the explicit grant list configured here.
pub struct ChatService {
    context_assembler: Arc<ContextAssembler>,
    chat_model: Arc<dyn ChatModel>,
    embedding_gateway: Arc<EmbeddingGateway>,
    message_repository: Arc<dyn MessageRepository>,
    granted_tools: Vec<ToolSpec>,
}

impl ChatService {
    pub fn new(
        context_assembler: Arc<ContextAssembler>,
        chat_model: Arc<dyn ChatModel>,
        embedding_gateway: Arc<EmbeddingGateway>,
        message_repository: Arc<dyn MessageRepository>,
        granted_tools: Vec<ToolSpec>,
    ) -> Self {
        Self {
            context_assembler,
            chat_model,
            embedding_gateway,
            message_repository,
            granted_tools,
        }
    }

    pub async fn handle_turn(
        &self,
        session_id: Uuid,
        user_text: &str,
        file_id: Option<Uuid>,
    ) -> Result<String, ChatError> {
        let context = self
            .context_assembler
            .build_context(session_id, user_text)
            .await
            .map_err(|e| ChatError::ContextError(e.to_string()))?;

        let answer = self
            .chat_model
            .complete(&context, &self.granted_tools)
            .await
            .map_err(|e| ChatError::ModelError(e.to_string()))?
            .trim()
            .to_string();

        let (user_vector, assistant_vector) = futures::try_join!(
            self.embedding_gateway.embed(user_text),
            self.embedding_gateway.embed(&answer),
        )
        .map_err(|e| ChatError::EmbeddingError(e.to_string()))?;

        let user_message = ChatMessage::new(
            session_id,
            file_id,
            MessageRole::User,
            user_text.to_string(),
            None,
        );
        self.message_repository
            .save_with_embedding(
                &user_message,
                &EmbeddingRecord::for_chat_message(
                    session_id,
                    user_message.id(),
                    user_text.to_string(),
                    user_vector,
                ),
            )
            .await
            .map_err(|e| ChatError::PersistenceError(e.to_string()))?;

        let assistant_message = ChatMessage::new(
            session_id,
            file_id,
            MessageRole::Assistant,
            answer.clone(),
            None,
        );
        self.message_repository
            .save_with_embedding(
                &assistant_message,
                &EmbeddingRecord::for_chat_message(
                    session_id,
                    assistant_message.id(),
                    answer.clone(),
                    assistant_vector,
                ),
            )
            .await
            .map_err(|e| ChatError::PersistenceError(e.to_string()))?;

        Ok(answer)
    }
}
