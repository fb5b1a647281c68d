pub mod error_code;
pub mod nullable;
pub mod pagination;
pub mod response;
pub mod string_enum;

pub use error_code::ErrorCode;
pub use nullable::deserialize_nullable;
pub use pagination::{
    ListQuery, PaginatedResponse, PaginationInfo, deserialize_optional_bool,
    deserialize_optional_i64,
};
pub use response::ApiResponse;
