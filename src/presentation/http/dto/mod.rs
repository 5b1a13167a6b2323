pub mod chat_dto;
pub mod file_dto;
pub mod response_dto;
pub mod session_dto;

pub use response_dto::{ApiResponse, HealthResponseDto, MessageResponseDto, PaginationDto};
