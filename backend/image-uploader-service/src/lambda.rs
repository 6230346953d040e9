//! AWS Lambda front end
//!
//! Translates API Gateway events delivered by `lambda_http` into
//! [`UploadRequest`]s and the handler's [`ApiResponse`] back into a Lambda
//! response. Infrastructure errors are returned to the runtime untouched so
//! the invocation is reported as failed.

use lambda_http::{Body, Error, Request, RequestExt, Response};

use crate::handlers::UploadHandler;
use crate::models::{ApiResponse, UploadQuery, UploadRequest};

/// Build an [`UploadRequest`] from a Lambda HTTP event.
///
/// `lambda_http` already undoes API Gateway's base64 wrapping of binary
/// bodies, so the body here is the base64 text the client sent.
pub fn upload_request(event: &Request) -> UploadRequest {
    let params = event.query_string_parameters_ref();
    let param = |name: &str| {
        params
            .and_then(|params| params.first(name))
            .map(str::to_string)
    };

    let query = UploadQuery {
        filename: param("filename"),
        h: param("h"),
        w: param("w"),
    };

    let body: &[u8] = event.body();
    UploadRequest::new(query, body.to_vec())
}

pub fn into_lambda_response(response: ApiResponse) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder().status(response.status);
    for (name, value) in &response.headers {
        builder = builder.header(*name, value.as_str());
    }

    let resp = builder
        .body(Body::Text(response.body))
        .map_err(Box::new)?;
    Ok(resp)
}

/// Handle one Lambda invocation
pub async fn function_handler(
    handler: &UploadHandler,
    event: Request,
) -> Result<Response<Body>, Error> {
    tracing::debug!(
        method = %event.method(),
        path = event.uri().path(),
        "Lambda invocation"
    );

    let request = upload_request(&event);
    let response = handler.handle(request).await?;
    into_lambda_response(response)
}
