/// Upload handler - validate, decode, resize, store, acknowledge
use base64::Engine;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::UploadConfig;
use crate::error::{AppError, ImageDataFault, InfraError, Result};
use crate::models::{ApiResponse, Dimensions, ResponseEnvelope, UploadMode, UploadRequest};
use crate::services::processor::{sniff_content_type, JPEG_CONTENT_TYPE};
use crate::services::{ImageProcessor, ObjectStore, ProcessError};

/// Either kind of failure, before client errors are folded into a response
#[derive(Debug)]
enum UploadFailure {
    Client(AppError),
    Infra(InfraError),
}

impl From<AppError> for UploadFailure {
    fn from(err: AppError) -> Self {
        UploadFailure::Client(err)
    }
}

impl From<InfraError> for UploadFailure {
    fn from(err: InfraError) -> Self {
        UploadFailure::Infra(err)
    }
}

impl From<serde_json::Error> for UploadFailure {
    fn from(err: serde_json::Error) -> Self {
        UploadFailure::Infra(InfraError::Serialization(err))
    }
}

impl From<ProcessError> for UploadFailure {
    fn from(err: ProcessError) -> Self {
        match err {
            ProcessError::Decode(_) => {
                UploadFailure::Client(AppError::InvalidImageData(ImageDataFault::Unrecognized))
            }
            ProcessError::Encode(msg) => UploadFailure::Infra(InfraError::Encode(msg)),
            ProcessError::Task(msg) => UploadFailure::Infra(InfraError::Task(msg)),
        }
    }
}

/// Validated query parameters
#[derive(Debug)]
struct UploadTarget {
    filename: String,
    key: String,
    dimensions: Option<Dimensions>,
}

/// Payload ready to be written
struct Payload {
    data: Bytes,
    content_type: &'static str,
}

/// Handles one upload invocation at a time; shared across invocations
pub struct UploadHandler {
    config: UploadConfig,
    processor: Arc<ImageProcessor>,
    store: Arc<dyn ObjectStore>,
}

impl UploadHandler {
    pub fn new(config: UploadConfig, store: Arc<dyn ObjectStore>) -> Self {
        let processor = Arc::new(ImageProcessor::new(config.jpeg_quality));
        Self {
            config,
            processor,
            store,
        }
    }

    pub fn mode(&self) -> UploadMode {
        self.config.mode
    }

    /// Run the pipeline for one request.
    ///
    /// Client input faults come back as `Ok` with a 400 response; only
    /// infrastructure faults are returned as `Err`.
    pub async fn handle(&self, request: UploadRequest) -> Result<ApiResponse> {
        match self.process(request).await {
            Ok(response) => Ok(response),
            Err(UploadFailure::Client(err)) => {
                warn!(mode = self.mode().as_str(), reason = %err, "Rejected upload");
                Ok(err.into_response())
            }
            Err(UploadFailure::Infra(err)) => {
                error!(mode = self.mode().as_str(), error = %err, "Upload failed");
                Err(err)
            }
        }
    }

    async fn process(
        &self,
        request: UploadRequest,
    ) -> std::result::Result<ApiResponse, UploadFailure> {
        let target = self.validate(&request)?;
        let original = self.decode_body(&request.body)?;
        let payload = self.prepare_payload(original, target.dimensions).await?;

        let size = payload.data.len();
        self.store
            .put_object(&target.key, payload.data, payload.content_type)
            .await?;

        let envelope = ResponseEnvelope {
            message: self.success_message(&target),
            url: self.store.public_url(&target.key),
        };
        let body = serde_json::to_string(&envelope)?;

        info!(
            mode = self.mode().as_str(),
            key = %target.key,
            bytes = size,
            "Image uploaded"
        );

        Ok(ApiResponse::json(200, body))
    }

    fn validate(&self, request: &UploadRequest) -> std::result::Result<UploadTarget, AppError> {
        let filename = request
            .query
            .filename
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or(AppError::MissingFilename)?
            .to_string();

        let dimensions = match self.mode() {
            UploadMode::Dimensions => {
                let height = self.parse_dimension(request.query.h.as_deref());
                let width = self.parse_dimension(request.query.w.as_deref());
                match (height, width) {
                    (Some(height), Some(width)) => Some(Dimensions { height, width }),
                    _ => return Err(AppError::InvalidDimensions),
                }
            }
            UploadMode::Thumbnail => Some(Dimensions::square(self.config.thumbnail_size)),
            UploadMode::Passthrough => None,
        };

        Ok(UploadTarget {
            key: self.mode().object_key(&filename),
            filename,
            dimensions,
        })
    }

    /// Base-10 edge length in `1..=max_dimension`
    fn parse_dimension(&self, raw: Option<&str>) -> Option<u32> {
        raw?.parse::<u32>()
            .ok()
            .filter(|value| (1..=self.config.max_dimension).contains(value))
    }

    /// Line breaks anywhere in the body are ignored, so wrapped output from
    /// `base64(1)` decodes the same as a single line.
    fn decode_body(&self, body: &[u8]) -> std::result::Result<Bytes, AppError> {
        base64::engine::general_purpose::STANDARD
            .decode(strip_line_breaks(trim_ascii_whitespace(body)))
            .map(Bytes::from)
            .map_err(|_| AppError::InvalidImageData(self.mode().base64_fault()))
    }

    async fn prepare_payload(
        &self,
        original: Bytes,
        dimensions: Option<Dimensions>,
    ) -> std::result::Result<Payload, UploadFailure> {
        match dimensions {
            Some(target) => {
                let resized = self.processor.clone().resize_async(original, target).await?;
                Ok(Payload {
                    data: resized.data,
                    content_type: JPEG_CONTENT_TYPE,
                })
            }
            None => {
                let content_type = sniff_content_type(&original);
                Ok(Payload {
                    data: original,
                    content_type,
                })
            }
        }
    }

    fn success_message(&self, target: &UploadTarget) -> String {
        match (self.mode(), target.dimensions) {
            (UploadMode::Dimensions, Some(dims)) => format!(
                "ImageUploaderService successfully uploaded the image with dimensions {}x{}.",
                dims.height, dims.width
            ),
            (UploadMode::Thumbnail, Some(dims)) => format!(
                "ImageUploaderService successfully uploaded the image as a {}x{} thumbnail.",
                dims.height, dims.width
            ),
            _ => format!(
                "ImageUploaderService successfully uploaded {}.",
                target.filename
            ),
        }
    }
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

fn strip_line_breaks(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .copied()
        .filter(|b| !matches!(b, b'\r' | b'\n'))
        .collect()
}
