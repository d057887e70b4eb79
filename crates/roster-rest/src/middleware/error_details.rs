//! Fills the `details` field of error bodies with the request path.

use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::ErrorResponse;

/// Rewrites error bodies produced by [`AppError`](crate::responses::AppError)
/// so that `details` reads `uri=<request path>`.
///
/// Must be layered on the outermost router, where the URI is not yet
/// stripped by nesting.
pub async fn error_details_middleware(request: Request<Body>, next: Next) -> Response {
    let details = ErrorResponse::request_details(request.uri().path());
    let response = next.run(request).await;
    attach_details(response, details)
}

fn attach_details(mut response: Response, details: String) -> Response {
    match response.extensions_mut().remove::<ErrorResponse>() {
        Some(mut body) => {
            body.details = details;
            (response.status(), Json(body)).into_response()
        }
        None => response,
    }
}
