//! Image processor - resizes uploaded images and re-encodes them as JPEG
//!
//! Decodes whatever raster container the bytes carry, resamples to an exact
//! target size with a Lanczos-3 filter, and encodes the result as baseline JPEG.
//!
//! Uses `spawn_blocking` for CPU-intensive operations to avoid blocking the async runtime.

use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageOutputFormat};
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::models::Dimensions;

/// Content type of every re-encoded payload
pub const JPEG_CONTENT_TYPE: &str = "image/jpeg";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum ProcessError {
    /// Bytes are not an image the decoder recognises
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode JPEG: {0}")]
    Encode(String),

    #[error("Image task panicked: {0}")]
    Task(String),
}

/// Result of a resize
#[derive(Debug)]
pub struct ProcessedImage {
    /// The resized image as JPEG
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
}

/// Image processor
pub struct ImageProcessor {
    /// JPEG quality (1-100)
    quality: u8,
}

impl ImageProcessor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Resize `original_data` to exactly `target` (blocking version)
    ///
    /// **Note:** This method performs CPU-intensive operations and should not be called
    /// directly from async code. Use `resize_async` instead.
    pub fn resize(
        &self,
        original_data: &[u8],
        target: Dimensions,
    ) -> Result<ProcessedImage, ProcessError> {
        let img = image::load_from_memory(original_data)
            .map_err(|e| ProcessError::Decode(e.to_string()))?;

        let (orig_w, orig_h) = img.dimensions();
        debug!(
            original_width = orig_w,
            original_height = orig_h,
            target_width = target.width,
            target_height = target.height,
            "Resizing image"
        );

        let resized = img.resize_exact(target.width, target.height, FilterType::Lanczos3);
        let data = self.encode_jpeg(&resized)?;

        debug!(size = data.len(), "Image re-encoded as JPEG");

        Ok(ProcessedImage {
            data,
            width: resized.width(),
            height: resized.height(),
        })
    }

    /// Resize on the blocking thread pool
    pub async fn resize_async(
        self: Arc<Self>,
        original_data: Bytes,
        target: Dimensions,
    ) -> Result<ProcessedImage, ProcessError> {
        let processor = self.clone();

        tokio::task::spawn_blocking(move || processor.resize(&original_data, target))
            .await
            .map_err(|e| ProcessError::Task(e.to_string()))?
    }

    /// Encode image as JPEG, dropping any alpha channel
    fn encode_jpeg(&self, img: &DynamicImage) -> Result<Bytes, ProcessError> {
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
        let mut buf = Vec::new();
        let mut cursor = Cursor::new(&mut buf);

        rgb.write_to(&mut cursor, ImageOutputFormat::Jpeg(self.quality))
            .map_err(|e| ProcessError::Encode(e.to_string()))?;

        Ok(Bytes::from(buf))
    }
}

/// MIME type for bytes stored without re-encoding
pub fn sniff_content_type(data: &[u8]) -> &'static str {
    match image::guess_format(data) {
        Ok(ImageFormat::Jpeg) => JPEG_CONTENT_TYPE,
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Gif) => "image/gif",
        Ok(ImageFormat::WebP) => "image/webp",
        Ok(ImageFormat::Bmp) => "image/bmp",
        Ok(ImageFormat::Tiff) => "image/tiff",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
