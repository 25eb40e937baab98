pub mod entities;
pub mod error_code;
pub mod errors_service;
pub mod repository;
pub mod user_service;
pub mod util;

pub use entities::*;
pub use error_code::ErrorCode;
pub use errors_service::*;
pub use user_service::*;
