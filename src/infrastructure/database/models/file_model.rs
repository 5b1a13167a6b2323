use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::UploadedFile;
use crate::infrastructure::database::schema::uploaded_files;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = uploaded_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FileModel {
    pub id: Uuid,
    pub session_id: Uuid,
    pub filename: String,
    pub file_size: i64,
    pub file_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = uploaded_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewFileModel {
    pub id: Uuid,
    pub session_id: Uuid,
    pub filename: String,
    pub file_size: i64,
    pub file_type: String,
    pub created_at: DateTime<Utc>,
}

impl From<&UploadedFile> for NewFileModel {
    fn from(file: &UploadedFile) -> Self {
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

impl From<FileModel> for UploadedFile {
    fn from(model: FileModel) -> Self {
        UploadedFile::from_parts(
            model.id,
            model.session_id,
            model.filename,
            model.file_size,
            model.file_type,
            model.created_at,
        )
    }
}
