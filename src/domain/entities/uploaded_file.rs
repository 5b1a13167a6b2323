use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata row for a document uploaded into a session. Immutable once
/// stored; the raw bytes themselves only ever live in temporary storage
/// for the duration of one ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    id: Uuid,
    session_id: Uuid,
    filename: String,
    file_size: i64,
    file_type: String,
    created_at: DateTime<Utc>,
}

impl UploadedFile {
    pub fn new(session_id: Uuid, filename: String, file_size: i64, file_type: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            filename,
            file_size,
            file_type,
            created_at: Utc::now(),
        }
    }

    pub fn from_parts(
        id: Uuid,
        session_id: Uuid,
        filename: String,
        file_size: i64,
        file_type: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            session_id,
            filename,
            file_size,
            file_type,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn file_size(&self) -> i64 {
        self.file_size
    }

    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_creation() {
        let session_id = Uuid::new_v4();
        let file = UploadedFile::new(
            session_id,
            "notes.txt".to_string(),
            42,
            "text/plain".to_string(),
        );

        assert_eq!(file.session_id(), session_id);
        assert_eq!(file.filename(), "notes.txt");
        assert_eq!(file.file_size(), 42);
        assert_eq!(file.file_type(), "text/plain");
    }
}
