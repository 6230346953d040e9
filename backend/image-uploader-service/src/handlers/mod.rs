/// Request handlers
pub mod upload;

pub use upload::UploadHandler;
