use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file provided")]
    MissingFile,

    #[error("No file provided")]
    EmptyFilename,

    #[error("Only .docx and .pdf allowed")]
    UnsupportedExtension { extension: String },

    #[error("Failed to read upload: {message}")]
    InvalidUpload { message: String },

    #[error("File too large: exceeds limit of {limit}MB")]
    FileTooLarge { limit: usize },

    #[error("File not found")]
    NotFound { name: String },

    // Raw parser message, returned to the client as-is.
    #[error("{message}")]
    Extraction { message: String },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingFile => "MISSING_FILE",
            AppError::EmptyFilename => "EMPTY_FILENAME",
            AppError::UnsupportedExtension { .. } => "UNSUPPORTED_EXTENSION",
            AppError::InvalidUpload { .. } => "INVALID_UPLOAD",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Extraction { .. } => "EXTRACTION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFile => StatusCode::BAD_REQUEST,
            AppError::EmptyFilename => StatusCode::BAD_REQUEST,
            AppError::UnsupportedExtension { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidUpload { .. } => StatusCode::BAD_REQUEST,
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Extraction { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for the rejections the client caused; these never count as failures.
    pub fn is_validation(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        if self.is_validation() {
            tracing::info!(
                error_code = error_code,
                status_code = %status,
                error_message = %message,
                "Request rejected"
            );
        } else {
            tracing::error!(
                error_code = error_code,
                status_code = %status,
                error = ?self,
                "Request failed"
            );
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal {
            message: format!("Extraction task failed: {}", err),
        }
    }
}

impl From<zip::result::ZipError> for AppError {
    fn from(err: zip::result::ZipError) -> Self {
        AppError::Extraction {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for AppError {
    fn from(err: quick_xml::Error) -> Self {
        AppError::Extraction {
            message: err.to_string(),
        }
    }
}

impl From<lopdf::Error> for AppError {
    fn from(err: lopdf::Error) -> Self {
        AppError::Extraction {
            message: err.to_string(),
        }
    }
}

impl AppError {
    pub fn extraction(message: impl Into<String>) -> Self {
        AppError::Extraction {
            message: message.into(),
        }
    }

    pub fn invalid_upload(message: impl Into<String>) -> Self {
        AppError::InvalidUpload {
            message: message.into(),
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        AppError::NotFound {
            name: name.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }
}
