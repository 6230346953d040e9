/// Data models for image-uploader-service
///
/// Request/response shapes shared by the Lambda and local HTTP front ends.
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ImageDataFault;

/// Fixed extension appended to keys in `dimensions` mode
pub const JPEG_EXTENSION: &str = ".jpeg";

/// Which revision of the upload pipeline is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    /// Store the decoded bytes unchanged
    Passthrough,
    /// Resize every image to a fixed square thumbnail
    Thumbnail,
    /// Resize to the caller's `h` x `w`
    Dimensions,
}

impl UploadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadMode::Passthrough => "passthrough",
            UploadMode::Thumbnail => "thumbnail",
            UploadMode::Dimensions => "dimensions",
        }
    }

    /// Object key for a caller-supplied filename.
    ///
    /// Only `dimensions` mode appends `.jpeg`; the other modes store under the
    /// filename exactly as given.
    pub fn object_key(&self, filename: &str) -> String {
        match self {
            UploadMode::Dimensions => format!("{filename}{JPEG_EXTENSION}"),
            UploadMode::Passthrough | UploadMode::Thumbnail => filename.to_string(),
        }
    }

    /// Fault reported when the body is not valid base64
    pub fn base64_fault(&self) -> ImageDataFault {
        match self {
            UploadMode::Passthrough => ImageDataFault::Malformed,
            UploadMode::Thumbnail | UploadMode::Dimensions => ImageDataFault::Unloadable,
        }
    }

    pub fn resizes(&self) -> bool {
        !matches!(self, UploadMode::Passthrough)
    }
}

impl FromStr for UploadMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passthrough" | "raw" => Ok(UploadMode::Passthrough),
            "thumbnail" => Ok(UploadMode::Thumbnail),
            "dimensions" | "resize" => Ok(UploadMode::Dimensions),
            other => Err(other.to_string()),
        }
    }
}

/// Target size of a resize, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub height: u32,
    pub width: u32,
}

impl Dimensions {
    pub fn square(edge: u32) -> Self {
        Self {
            height: edge,
            width: edge,
        }
    }
}

/// Query parameters of an upload request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadQuery {
    pub filename: Option<String>,
    pub h: Option<String>,
    pub w: Option<String>,
}

/// One inbound upload, independent of the hosting runtime
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub query: UploadQuery,
    /// Base64 text exactly as the client sent it
    pub body: Bytes,
}

impl UploadRequest {
    pub fn new(query: UploadQuery, body: impl Into<Bytes>) -> Self {
        Self {
            query,
            body: body.into(),
        }
    }
}

/// JSON acknowledgment returned on success
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub message: String,
    pub url: String,
}

/// Status, headers and body produced by the handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl ApiResponse {
    pub fn json(status: u16, body: String) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", "application/json".to_string())],
            body,
        }
    }

    pub fn text(status: u16, body: String) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", "text/plain; charset=utf-8".to_string())],
            body,
        }
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_per_mode() {
        assert_eq!(UploadMode::Dimensions.object_key("cat"), "cat.jpeg");
        assert_eq!(UploadMode::Thumbnail.object_key("cat"), "cat");
        assert_eq!(UploadMode::Passthrough.object_key("cat.png"), "cat.png");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Thumbnail".parse::<UploadMode>(), Ok(UploadMode::Thumbnail));
        assert_eq!(" raw ".parse::<UploadMode>(), Ok(UploadMode::Passthrough));
        assert_eq!("dimensions".parse::<UploadMode>(), Ok(UploadMode::Dimensions));
        assert!("webp".parse::<UploadMode>().is_err());
    }

    #[test]
    fn test_only_passthrough_skips_resize() {
        assert!(!UploadMode::Passthrough.resizes());
        assert!(UploadMode::Thumbnail.resizes());
        assert!(UploadMode::Dimensions.resizes());
    }

    #[test]
    fn test_envelope_serializes_message_and_url() {
        let envelope = ResponseEnvelope {
            message: "ok".into(),
            url: "https://example.com/a".into(),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["message"], "ok");
        assert_eq!(json["url"], "https://example.com/a");
    }
}
