//! Image Uploader Service
//!
//! Accepts a base64-encoded image, optionally resizes it, stores it in S3 and
//! answers with the object's public URL. Runs as an AWS Lambda function or as
//! a local actix-web server.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod lambda;
pub mod models;
pub mod services;

// Public re-exports
pub use config::Config;
pub use error::{AppError, InfraError, Result};
pub use handlers::UploadHandler;
