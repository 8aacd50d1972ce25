// HTTP API Error Types
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::api::FieldErrors;
use crate::services::StudentError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Every variant renders as a plain text body except `ValidationError`,
/// which renders its field map as a JSON object.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError { field_errors: FieldErrors },
    InvalidJson(String),

    // 404 Not Found
    NotFound(String),

    // 413 Payload Too Large
    PayloadTooLarge(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError { .. } => 400,
            ApiError::InvalidJson(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::PayloadTooLarge(_) => 413,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { .. } => "Validation failed",
            ApiError::InvalidJson(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::PayloadTooLarge(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(field_errors: FieldErrors) -> Self {
        ApiError::ValidationError { field_errors }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Convert other error types to ApiError
impl From<StudentError> for ApiError {
    fn from(err: StudentError) -> Self {
        let message = err.to_string();
        match err {
            StudentError::NotFound(_) => ApiError::not_found(message),
            StudentError::InvalidId(_) | StudentError::DuplicateName => ApiError::bad_request(message),
            StudentError::Validation(field_errors) => ApiError::validation_error(field_errors),
            StudentError::Database(db_err) => {
                // Log the real error but return generic message
                tracing::error!("Database error: {}", db_err);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge(rejection.body_text());
        }
        ApiError::invalid_json(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self {
            ApiError::ValidationError { field_errors } => (status, Json(field_errors)).into_response(),
            other => (status, other.message().to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseError;

    #[test]
    fn student_errors_map_to_status_and_text() {
        let cases = [
            (StudentError::NotFound(3003), 404, "id=3003 Student not found!"),
            (StudentError::InvalidId(2221), 400, "given id is invalid."),
            (StudentError::DuplicateName, 400, "firstName and LastName are already available"),
        ];
        for (err, status, message) in cases {
            let api_error = ApiError::from(err);
            assert_eq!(api_error.status_code(), status);
            assert_eq!(api_error.message(), message);
        }
    }

    #[test]
    fn database_details_are_not_exposed() {
        let err = StudentError::Database(DatabaseError::QueryError("relation \"students\" does not exist".into()));
        let api_error = ApiError::from(err);
        assert_eq!(api_error.status_code(), 500);
        assert!(!api_error.message().contains("students"));
    }

    #[test]
    fn validation_keeps_field_map() {
        let mut field_errors = FieldErrors::new();
        field_errors.insert("address".into(), "address should not be null or blank".into());
        match ApiError::from(StudentError::Validation(field_errors.clone())) {
            ApiError::ValidationError { field_errors: mapped } => assert_eq!(mapped, field_errors),
            other => panic!("unexpected {:?}", other),
        }
    }
}
