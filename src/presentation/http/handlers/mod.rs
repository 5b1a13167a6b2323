pub mod chat_handler;
pub mod file_handler;
pub mod session_handler;

pub use chat_handler::ChatHandler;
pub use file_handler::FileHandler;
pub use session_handler::SessionHandler;
