use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ChatHandler;

pub fn chat_routes(chat_handler: Arc<ChatHandler>) -> Router {
    Router::new()
        .route("/sessions/{session_id}/chat", post(ChatHandler::send_message))
        .route("/sessions/{session_id}/chat", get(ChatHandler::get_history))
        .with_state(chat_handler)
}
