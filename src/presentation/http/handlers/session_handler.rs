use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    CreateSessionUseCase, DeleteSessionUseCase, GetSessionUseCase, ListSessionsUseCase,
    UpdateSessionUseCase, create_session::CreateSessionRequest,
    delete_session::DeleteSessionError, get_session::GetSessionError,
    list_sessions::ListSessionsRequest, update_session::UpdateSessionError,
    update_session::UpdateSessionRequest,
};
use crate::presentation::http::dto::{
    ApiResponse, MessageResponseDto, PaginationDto,
    session_dto::{
        CreateSessionRequestDto, SessionListResponseDto, SessionResponseDto,
        UpdateSessionRequestDto,
    },
};

pub struct SessionHandler {
    create_use_case: Arc<CreateSessionUseCase>,
    get_use_case: Arc<GetSessionUseCase>,
    update_use_case: Arc<UpdateSessionUseCase>,
    delete_use_case: Arc<DeleteSessionUseCase>,
    list_use_case: Arc<ListSessionsUseCase>,
}

impl SessionHandler {
    pub fn new(
        create_use_case: Arc<CreateSessionUseCase>,
        get_use_case: Arc<GetSessionUseCase>,
        update_use_case: Arc<UpdateSessionUseCase>,
        delete_use_case: Arc<DeleteSessionUseCase>,
        list_use_case: Arc<ListSessionsUseCase>,
    ) -> Self {
        Self {
            create_use_case,
            get_use_case,
            update_use_case,
            delete_use_case,
            list_use_case,
        }
    }

    pub async fn create_session(
        State(handler): State<Arc<SessionHandler>>,
        Json(body): Json<CreateSessionRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = CreateSessionRequest {
            title: body.title,
            metadata: body.metadata,
        };

        match handler.create_use_case.execute(request).await {
            Ok(session) => {
                let dto = SessionResponseDto::from(session);
                Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "SESSION_CREATE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn get_session(
        State(handler): State<Arc<SessionHandler>>,
        Path(session_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.get_use_case.execute(session_id).await {
            Ok(session) => {
                let dto = SessionResponseDto::from(session);
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(GetSessionError::NotFound(id)) => Ok((
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
                    "SESSION_GET_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn update_session(
        State(handler): State<Arc<SessionHandler>>,
        Path(session_id): Path<Uuid>,
        Json(body): Json<UpdateSessionRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = UpdateSessionRequest {
            session_id,
            title: body.title,
            metadata: body.metadata,
        };

        match handler.update_use_case.execute(request).await {
            Ok(session) => {
                let dto = SessionResponseDto::from(session);
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(UpdateSessionError::NotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "SESSION_NOT_FOUND".to_string(),
                    format!("Session not found: {}", id),
                    None,
                )),
            )),
            Err(UpdateSessionError::ValidationError(msg)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "INVALID_UPDATE".to_string(),
                    msg,
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "SESSION_UPDATE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn delete_session(
        State(handler): State<Arc<SessionHandler>>,
        Path(session_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.delete_use_case.execute(session_id).await {
            Ok(()) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(MessageResponseDto {
                    message: "Session deleted successfully".to_string(),
                })),
            )),
            Err(DeleteSessionError::NotFound(id)) => Ok((
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
                    "SESSION_DELETE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn list_sessions(
        State(handler): State<Arc<SessionHandler>>,
        Query(pagination): Query<PaginationDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = ListSessionsRequest {
            limit: pagination.limit,
            offset: pagination.offset,
        };

        match handler.list_use_case.execute(request).await {
            Ok(sessions) => {
                let sessions: Vec<SessionResponseDto> =
                    sessions.into_iter().map(SessionResponseDto::from).collect();
                let total = sessions.len();
                Ok((
                    StatusCode::OK,
                    Json(ApiResponse::success(SessionListResponseDto {
                        sessions,
                        total,
                    })),
                ))
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "SESSION_LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
