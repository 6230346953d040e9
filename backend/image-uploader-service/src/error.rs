/// Error types for Image Uploader Service
///
/// Client-input faults (`AppError`) are answered with a plain-text 400.
/// Infrastructure faults (`InfraError`) are never shaped into a response body;
/// they propagate to whatever hosts the handler.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::models::ApiResponse;

/// Result type for infrastructure-level operations
pub type Result<T> = std::result::Result<T, InfraError>;

/// Why the request body could not be turned into an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDataFault {
    /// Body is not valid base64 (passthrough mode)
    Malformed,
    /// Body is not valid base64 (resizing modes)
    Unloadable,
    /// Bytes decoded but are not a recognised raster format
    Unrecognized,
}

impl ImageDataFault {
    pub fn message(&self) -> &'static str {
        match self {
            ImageDataFault::Malformed => "Invalid image data",
            ImageDataFault::Unloadable => "Invalid image data, Cannot load binary Image data",
            ImageDataFault::Unrecognized => {
                "Invalid image data, Cannot convert binary into Image object"
            }
        }
    }
}

/// Client input errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Missing filename")]
    MissingFilename,

    #[error("Invalid image dimensions")]
    InvalidDimensions,

    #[error("{}", .0.message())]
    InvalidImageData(ImageDataFault),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Render the error as the plain-text response the caller sees
    pub fn into_response(self) -> ApiResponse {
        ApiResponse::text(self.status_code().as_u16(), self.to_string())
    }
}

/// Infrastructure errors
#[derive(Debug, Error)]
pub enum InfraError {
    /// Object storage write failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Re-encoding the resized image failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// Response envelope could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Blocking image task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),
}

impl ResponseError for InfraError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).finish()
    }
}
