use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid file type. Only PDF, DOC, DOCX, and TXT are allowed")]
    InvalidFileType,

    #[error("Empty file received")]
    EmptyFile,

    #[error("File size exceeds 5MB limit")]
    FileTooLarge,

    #[error("Decode error: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Malformed upload: {0}")]
    MalformedUpload(String),

    #[error("AI Service unavailable after {attempts} attempts")]
    ServiceUnavailable { attempts: u32 },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidFileType
            | AppError::EmptyFile
            | AppError::FileTooLarge
            | AppError::Decode(_)
            | AppError::Extraction(_)
            | AppError::MalformedUpload(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::InvalidFileType | AppError::EmptyFile | AppError::FileTooLarge => {
                tracing::error!("Rejected upload: {self}");
                self.to_string()
            }
            AppError::Decode(e) => {
                tracing::error!("Decode error: {e}");
                "Unable to decode file as UTF-8 text".to_string()
            }
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                "Failed to extract text from document".to_string()
            }
            AppError::MalformedUpload(msg) => {
                tracing::error!("Malformed upload: {msg}");
                msg.clone()
            }
            AppError::ServiceUnavailable { attempts } => {
                tracing::error!("Model unavailable after {attempts} attempts");
                "AI Service unavailable after multiple attempts".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Unexpected error: {e:?}");
                "Internal server error".to_string()
            }
        };

        (self.status(), Json(json!({ "detail": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn detail_of(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_errors_are_400_with_verbatim_message() {
        let (status, body) = detail_of(AppError::FileTooLarge).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "File size exceeds 5MB limit");
    }

    #[tokio::test]
    async fn test_internal_error_does_not_leak_detail() {
        let err = AppError::Internal(anyhow::anyhow!("connection string postgres://secret"));
        let (status, body) = detail_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Internal server error");
    }

    #[tokio::test]
    async fn test_service_unavailable_is_500() {
        let (status, body) = detail_of(AppError::ServiceUnavailable { attempts: 3 }).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "AI Service unavailable after multiple attempts"
        );
    }

    #[tokio::test]
    async fn test_extraction_message_is_generic() {
        let err = AppError::Extraction("xref table broken at offset 42".to_string());
        let (status, body) = detail_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Failed to extract text from document");
    }
}
