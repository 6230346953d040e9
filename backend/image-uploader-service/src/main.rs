/// Image Uploader Service - AWS Lambda entry point
///
/// Builds the S3 client once per cold start and serves every invocation with
/// the same shared handler.
use image_uploader_service::lambda::function_handler;
use image_uploader_service::services::S3ObjectStore;
use image_uploader_service::{Config, UploadHandler};
use lambda_http::{run, service_fn, Error, Request};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "image_uploader_service=info,info".into()),
        )
        .with_target(false)
        .without_time()
        .json()
        .init();

    let config = Config::from_env()?;
    let store = S3ObjectStore::from_config(config.s3.clone()).await;
    tracing::info!(
        mode = config.upload.mode.as_str(),
        bucket = store.bucket(),
        region = %config.s3.region,
        "Image uploader starting"
    );

    let handler = Arc::new(UploadHandler::new(config.upload.clone(), Arc::new(store)));

    run(service_fn(move |event: Request| {
        let handler = Arc::clone(&handler);
        async move { function_handler(&handler, event).await }
    }))
    .await
}
