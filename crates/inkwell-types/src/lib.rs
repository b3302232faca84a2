pub mod api;
pub mod error;
pub mod pagination;

pub use error::{Error, FieldError, Result};
pub use pagination::Pagination;
