pub mod error_code;
pub mod localized;
pub mod pagination;
pub mod response;

pub use error_code::ErrorCode;
pub use localized::{LocalizedText, LocalizedTextPatch};
pub use pagination::{PageWindow, PaginationQuery};
pub use response::{ErrorDetail, ErrorResponse};
