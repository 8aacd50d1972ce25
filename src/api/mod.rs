pub mod date_format;
pub mod dto;
pub mod validation;

pub use dto::{StudentRequest, StudentResponse};
pub use validation::FieldErrors;
