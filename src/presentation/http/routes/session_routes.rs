use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::presentation::http::handlers::SessionHandler;

pub fn session_routes(session_handler: Arc<SessionHandler>) -> Router {
    Router::new()
        .route("/sessions", post(SessionHandler::create_session))
        .route("/sessions", get(SessionHandler::list_sessions))
        .route("/sessions/{session_id}", get(SessionHandler::get_session))
        .route("/sessions/{session_id}", put(SessionHandler::update_session))
        .route(
            "/sessions/{session_id}",
            delete(SessionHandler::delete_session),
        )
        .with_state(session_handler)
}
