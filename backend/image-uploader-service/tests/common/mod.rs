#![allow(dead_code)]

pub mod mock_object_store;

use base64::Engine;
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use image_uploader_service::config::UploadConfig;
use image_uploader_service::models::{UploadMode, UploadQuery, UploadRequest};
use image_uploader_service::UploadHandler;
use std::io::Cursor;
use std::sync::Arc;

pub use mock_object_store::MockObjectStore;

pub fn handler(mode: UploadMode, store: &MockObjectStore) -> UploadHandler {
    let config = UploadConfig {
        mode,
        ..UploadConfig::default()
    };
    UploadHandler::new(config, Arc::new(store.clone()))
}

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

pub fn encode(width: u32, height: u32, format: ImageOutputFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    gradient(width, height)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageOutputFormat::Png)
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageOutputFormat::Jpeg(90))
}

pub fn b64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub fn request(
    filename: Option<&str>,
    h: Option<&str>,
    w: Option<&str>,
    body: &str,
) -> UploadRequest {
    UploadRequest::new(
        UploadQuery {
            filename: filename.map(String::from),
            h: h.map(String::from),
            w: w.map(String::from),
        },
        body.to_string(),
    )
}
