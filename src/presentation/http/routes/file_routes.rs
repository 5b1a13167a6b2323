use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::FileHandler;

pub fn file_routes(file_handler: Arc<FileHandler>) -> Router {
    Router::new()
        .route(
            "/sessions/{session_id}/files",
            post(FileHandler::upload_file),
        )
        .route("/sessions/{session_id}/files", get(FileHandler::list_files))
        .route(
            "/sessions/{session_id}/files/{file_id}",
            delete(FileHandler::delete_file),
        )
        .with_state(file_handler)
}
