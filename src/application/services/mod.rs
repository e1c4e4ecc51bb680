pub mod channel_source_service;
pub mod session_service;
