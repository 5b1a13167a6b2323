use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::use_cases::upload_file::UploadFileResponse;
use crate::domain::entities::UploadedFile;

#[derive(Debug, Serialize)]
pub struct UploadResponseDto {
    pub file_id: Uuid,
    pub filename: String,
    pub size: i64,
    pub mime_type: String,
}

impl From<UploadFileResponse> for UploadResponseDto {
    fn from(response: UploadFileResponse) -> Self {
        Self {
            file_id: response.file_id,
            filename: response.filename,
            size: response.file_size,
            mime_type: response.mime_type,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileResponseDto {
    pub id: Uuid,
    pub session_id: Uuid,
    pub filename: String,
    pub file_size: i64,
    pub file_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<UploadedFile> for FileResponseDto {
    fn from(file: UploadedFile) -> Self {
        Self {
            id: file.id(),
            session_id: file.session_id(),
            filename: file.filename().to_string(),
            file_size: file.file_size(),
            file_type: file.file_type().to_string(),
            created_at: file.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FileListResponseDto {
    pub files: Vec<FileResponseDto>,
    pub total: usize,
}
