use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Query, Request};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{MethodRouter, get};
use std::sync::Arc;

use super::service::{CounterError, CounterService};
use super::types::{CountsQuery, ErrorResponse, IncrementRequest, IncrementResponse};

/// Builds the method router for one counter resource: GET/POST/OPTIONS plus a
/// JSON 405 for everything else, with the fixed cross-origin headers applied
/// to every response the resource produces.
pub fn counter_resource(service: Arc<CounterService>, allow_origin: HeaderValue) -> MethodRouter {
    get(handle_get_counts)
        .post(handle_increment)
        .options(handle_preflight)
        .fallback(handle_method_not_allowed)
        .layer(Extension(service))
        .layer(middleware::from_fn(
            move |request: Request, next: Next| {
                let origin = allow_origin.clone();
                async move {
                    let mut response = next.run(request).await;
                    let headers = response.headers_mut();
                    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                    headers.insert(
                        header::ACCESS_CONTROL_ALLOW_METHODS,
                        HeaderValue::from_static("GET, POST, OPTIONS"),
                    );
                    headers.insert(
                        header::ACCESS_CONTROL_ALLOW_HEADERS,
                        HeaderValue::from_static("Content-Type"),
                    );
                    response
                }
            },
        ))
}

pub async fn handle_get_counts(
    Extension(service): Extension<Arc<CounterService>>,
    Query(params): Query<CountsQuery>,
) -> Response {
    let slug = params.slug.unwrap_or_default();

    match service.counts(&slug).await {
        Ok(counts) => (StatusCode::OK, Json(counts)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn handle_increment(
    Extension(service): Extension<Arc<CounterService>>,
    body: Result<Json<IncrementRequest>, JsonRejection>,
) -> Response {
    // A missing or unparseable body is the same invalid-params failure as a
    // body with bad fields.
    let Ok(Json(request)) = body else {
        return error_response(CounterError::InvalidParams);
    };

    let slug = request.slug.unwrap_or_default();
    let dimension = request.dimension.unwrap_or_default();

    match service.increment(&slug, &dimension).await {
        Ok(counts) => (
            StatusCode::OK,
            Json(IncrementResponse {
                success: true,
                counts,
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn handle_preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn handle_method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
        }),
    )
        .into_response()
}

fn error_response(err: CounterError) -> Response {
    match err {
        CounterError::SlugRequired | CounterError::InvalidParams => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: err.to_string(),
            }),
        )
            .into_response(),
        CounterError::Store(err) => {
            tracing::error!("Store call failed: {:#}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "store unavailable".to_string(),
                }),
            )
                .into_response()
        }
    }
}
