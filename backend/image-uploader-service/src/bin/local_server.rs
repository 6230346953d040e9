//! Local Server - runs the upload handler behind actix-web
//!
//! Same pipeline as the Lambda function, reachable at `POST /upload` for local
//! development against S3 or MinIO (`S3_ENDPOINT`).

use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use anyhow::Context;
use image_uploader_service::http;
use image_uploader_service::services::S3ObjectStore;
use image_uploader_service::{Config, UploadHandler};
use std::sync::Arc;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "image_uploader_service=info,local_server=info,info".into()),
        )
        .with_target(false)
        .json()
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let bind_address = format!("{}:{}", config.app.host, config.app.port);

    let store = S3ObjectStore::from_config(config.s3.clone()).await;
    info!(
        mode = config.upload.mode.as_str(),
        bucket = store.bucket(),
        address = %bind_address,
        "Local upload server starting"
    );
    let handler = Arc::new(UploadHandler::new(config.upload.clone(), Arc::new(store)));

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(handler.clone()))
            .wrap(actix_middleware::Logger::default())
            .configure(http::configure)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {bind_address}"))?
    .run()
    .await
    .context("Local server terminated with an error")?;

    info!("Local upload server shutting down");
    Ok(())
}
