pub mod chat_routes;
pub mod file_routes;
pub mod health_routes;
pub mod session_routes;

pub use chat_routes::chat_routes;
pub use file_routes::file_routes;
pub use health_routes::health_routes;
pub use session_routes::session_routes;
