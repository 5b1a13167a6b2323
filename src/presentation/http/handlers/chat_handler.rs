use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    GetChatHistoryUseCase, SendMessageUseCase, get_chat_history::GetChatHistoryError,
    get_chat_history::GetChatHistoryRequest, send_message::SendMessageError,
    send_message::SendMessageRequest,
};
use crate::domain::repositories::message_repository::MessageSort;
use crate::presentation::http::dto::{
    ApiResponse,
    chat_dto::{ChatHistoryQueryDto, ChatHistoryResponseDto, ChatMessageDto, ChatRequestDto, ChatResponseDto},
};

pub struct ChatHandler {
    send_message_use_case: Arc<SendMessageUseCase>,
    get_history_use_case: Arc<GetChatHistoryUseCase>,
}

impl ChatHandler {
    pub fn new(
        send_message_use_case: Arc<SendMessageUseCase>,
        get_history_use_case: Arc<GetChatHistoryUseCase>,
    ) -> Self {
        Self {
            send_message_use_case,
            get_history_use_case,
        }
    }

    pub async fn send_message(
        State(handler): State<Arc<ChatHandler>>,
        Path(session_id): Path<Uuid>,
        Json(body): Json<ChatRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = SendMessageRequest {
            session_id,
            question: body.question,
            file_id: body.file_id,
        };

        match handler.send_message_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(ChatResponseDto {
                    message: response.message,
                })),
            )),
            Err(SendMessageError::SessionNotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "SESSION_NOT_FOUND".to_string(),
                    format!("Session not found: {}", id),
                    None,
                )),
            )),
            Err(SendMessageError::ValidationError(msg)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error("INVALID_QUESTION".to_string(), msg, None)),
            )),
            Err(SendMessageError::UpstreamFailed(msg)) => Ok((
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::error(
                    "CHAT_TURN_FAILED".to_string(),
                    msg,
                    None,
                )),
            )),
            Err(SendMessageError::PersistenceFailed(msg)) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "CHAT_TURN_FAILED".to_string(),
                    msg,
                    None,
                )),
            )),
        }
    }

    pub async fn get_history(
        State(handler): State<Arc<ChatHandler>>,
        Path(session_id): Path<Uuid>,
        Query(query): Query<ChatHistoryQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let sort = match query.sort.as_deref() {
            Some("desc") => MessageSort::Descending,
            _ => MessageSort::Ascending,
        };

        let request = GetChatHistoryRequest {
            session_id,
            sort,
            limit: query.limit,
            offset: query.offset,
        };

        match handler.get_history_use_case.execute(request).await {
            Ok(messages) => {
                let messages: Vec<ChatMessageDto> =
                    messages.into_iter().map(ChatMessageDto::from).collect();
                let total = messages.len();
                Ok((
                    StatusCode::OK,
                    Json(ApiResponse::success(ChatHistoryResponseDto {
                        messages,
                        total,
                    })),
                ))
            }
            Err(GetChatHistoryError::SessionNotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "SESSION_NOT_FOUND".to_string(),
                    format!("Session not found: {}", id),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "CHAT_HISTORY_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
