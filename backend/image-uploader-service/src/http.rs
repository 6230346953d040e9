/// Local HTTP front end - serves the upload handler over actix-web
use actix_web::{http::StatusCode, web, HttpResponse};
use bytes::Bytes;
use std::sync::Arc;

use crate::error::Result;
use crate::handlers::UploadHandler;
use crate::models::{ApiResponse, UploadQuery, UploadRequest};

/// Upper bound on request bodies accepted by the local server
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

impl From<ApiResponse> for HttpResponse {
    fn from(response: ApiResponse) -> Self {
        let status =
            StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut builder = HttpResponse::build(status);
        for (name, value) in response.headers {
            builder.insert_header((name, value));
        }
        builder.body(response.body)
    }
}

/// POST /upload?filename=..&h=..&w=..
pub async fn upload(
    handler: web::Data<Arc<UploadHandler>>,
    query: web::Query<UploadQuery>,
    body: Bytes,
) -> Result<HttpResponse> {
    let request = UploadRequest::new(query.into_inner(), body);
    let response = handler.handle(request).await?;
    Ok(response.into())
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

/// Register routes on an actix `App`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .route("/upload", web::post().to(upload))
        .route("/health", web::get().to(health));
}
