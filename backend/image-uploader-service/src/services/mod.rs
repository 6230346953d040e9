/// Service layer for the upload pipeline
///
/// - Processor: decode, Lanczos-3 resize and JPEG re-encode
/// - Storage: object store abstraction and its S3 implementation
pub mod processor;
pub mod storage;

pub use processor::{ImageProcessor, ProcessError, ProcessedImage};
pub use storage::{ObjectStore, S3ObjectStore};
