pub mod create_session;
pub mod delete_file;
pub mod delete_session;
pub mod get_chat_history;
pub mod get_session;
pub mod list_files;
pub mod list_sessions;
pub mod send_message;
pub mod update_session;
pub mod upload_file;

pub use create_session::CreateSessionUseCase;
pub use delete_file::DeleteFileUseCase;
pub use delete_session::DeleteSessionUseCase;
pub use get_chat_history::GetChatHistoryUseCase;
pub use get_session::GetSessionUseCase;
pub use list_files::ListFilesUseCase;
pub use list_sessions::ListSessionsUseCase;
pub use send_message::SendMessageUseCase;
pub use update_session::UpdateSessionUseCase;
pub use upload_file::UploadFileUseCase;
