use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    DeleteFileUseCase, ListFilesUseCase, UploadFileUseCase, delete_file::DeleteFileError,
    list_files::ListFilesError, upload_file::UploadFileError, upload_file::UploadFileRequest,
};
use crate::presentation::http::dto::{
    ApiResponse, MessageResponseDto,
    file_dto::{FileListResponseDto, FileResponseDto, UploadResponseDto},
};

pub struct FileHandler {
    upload_use_case: Arc<UploadFileUseCase>,
    list_use_case: Arc<ListFilesUseCase>,
    delete_use_case: Arc<DeleteFileUseCase>,
}

impl FileHandler {
    pub fn new(
        upload_use_case: Arc<UploadFileUseCase>,
        list_use_case: Arc<ListFilesUseCase>,
        delete_use_case: Arc<DeleteFileUseCase>,
    ) -> Self {
        Self {
            upload_use_case,
            list_use_case,
            delete_use_case,
        }
    }

    pub async fn upload_file(
        State(handler): State<Arc<FileHandler>>,
        Path(session_id): Path<Uuid>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, StatusCode> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            let Some(filename) = field.file_name().map(|f| f.to_string()) else {
                continue;
            };

            let mime_type = field
                .content_type()
                .map(|ct| ct.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());

            let bytes = field
                .bytes()
                .await
                .map_err(|_| StatusCode::BAD_REQUEST)?
                .to_vec();

            let request = UploadFileRequest {
                session_id,
                filename,
                mime_type,
                bytes,
            };

            return match handler.upload_use_case.execute(request).await {
                Ok(response) => {
                    let dto = UploadResponseDto::from(response);
                    Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
                }
                Err(UploadFileError::SessionNotFound(id)) => Ok((
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::error(
                        "SESSION_NOT_FOUND".to_string(),
                        format!("Session not found: {}", id),
                        None,
                    )),
                )),
                Err(UploadFileError::UnsupportedFileType(mime)) => Ok((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(
                        "UNSUPPORTED_FILE_TYPE".to_string(),
                        format!("Unsupported file type: {}", mime),
                        Some("Only text, CSV and PDF files are allowed".to_string()),
                    )),
                )),
                Err(UploadFileError::ValidationError(msg)) => Ok((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error("INVALID_UPLOAD".to_string(), msg, None)),
                )),
                Err(UploadFileError::UpstreamFailed(msg)) => Ok((
                    StatusCode::BAD_GATEWAY,
                    Json(ApiResponse::error(
                        "INGESTION_FAILED".to_string(),
                        msg,
                        None,
                    )),
                )),
                Err(UploadFileError::PersistenceFailed(msg)) => Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error(
                        "INGESTION_FAILED".to_string(),
                        msg,
                        None,
                    )),
                )),
            };
        }

        Ok((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "NO_FILE_PROVIDED".to_string(),
                "No file provided in the request".to_string(),
                None,
            )),
        ))
    }

    pub async fn list_files(
        State(handler): State<Arc<FileHandler>>,
        Path(session_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.list_use_case.execute(session_id).await {
            Ok(files) => {
                let files: Vec<FileResponseDto> =
                    files.into_iter().map(FileResponseDto::from).collect();
                let total = files.len();
                Ok((
                    StatusCode::OK,
                    Json(ApiResponse::success(FileListResponseDto { files, total })),
                ))
            }
            Err(ListFilesError::SessionNotFound(id)) => Ok((
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
                    "FILE_LIST_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }

    pub async fn delete_file(
        State(handler): State<Arc<FileHandler>>,
        Path((_session_id, file_id)): Path<(Uuid, Uuid)>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.delete_use_case.execute(file_id).await {
            Ok(()) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(MessageResponseDto {
                    message: "File deleted successfully".to_string(),
                })),
            )),
            Err(DeleteFileError::NotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(
                    "FILE_NOT_FOUND".to_string(),
                    format!("File not found: {}", id),
                    None,
                )),
            )),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(
                    "FILE_DELETE_FAILED".to_string(),
                    e.to_string(),
                    None,
                )),
            )),
        }
    }
}
