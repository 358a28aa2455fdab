use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    StorageError(String),
    UploadError(String),
    TokenError(String),
    NotFound(String),
    Conflict(String),
    InvalidCredentials,
    InvalidRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            AppError::UploadError(msg) => write!(f, "Upload error: {}", msg),
            AppError::TokenError(msg) => write!(f, "Token error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Message sent to the client. Internal failures stay in the log.
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(_) => "User not found".to_string(),
            AppError::Conflict(_) => "User already exists".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::InvalidRequest(msg) => msg.clone(),
            AppError::StorageError(_) | AppError::UploadError(_) | AppError::TokenError(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::StorageError(_) | AppError::UploadError(_) | AppError::TokenError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.public_message()
        }))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::StorageError(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::StorageError(format!("Invalid users file: {}", e))
    }
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(e: actix_multipart::MultipartError) -> Self {
        AppError::InvalidRequest(format!("Malformed multipart body: {}", e))
    }
}
