use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::error;

use super::domain::CareerId;
use super::repository::{CareerRepository, OrganizationDirectory};
use super::service::{CareerService, CareerServiceError};

/// Router builder exposing the posting endpoint and record lookup.
pub fn career_router<D, R>(service: Arc<CareerService<D, R>>) -> Router
where
    D: OrganizationDirectory + 'static,
    R: CareerRepository + 'static,
{
    Router::new()
        .route("/api/v1/careers", post(create_handler::<D, R>))
        .route("/api/v1/careers/:career_id", get(fetch_handler::<D, R>))
        .with_state(service)
}

pub(crate) async fn create_handler<D, R>(
    State(service): State<Arc<CareerService<D, R>>>,
    axum::Json(payload): axum::Json<Value>,
) -> Response
where
    D: OrganizationDirectory + 'static,
    R: CareerRepository + 'static,
{
    match service.create(&payload) {
        Ok(career) => {
            let body = json!({
                "message": "Career added successfully",
                "career": career,
            });
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn fetch_handler<D, R>(
    State(service): State<Arc<CareerService<D, R>>>,
    Path(career_id): Path<String>,
) -> Response
where
    D: OrganizationDirectory + 'static,
    R: CareerRepository + 'static,
{
    match service.get(&CareerId(career_id)) {
        Ok(Some(career)) => (StatusCode::OK, axum::Json(career)).into_response(),
        Ok(None) => {
            let body = json!({ "error": "Career not found" });
            (StatusCode::NOT_FOUND, axum::Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// Map pipeline failures to wire responses. Validation and quota messages
/// surface verbatim; internal failures are logged and flattened to one
/// generic message so no detail leaks to the caller.
fn error_response(err: CareerServiceError) -> Response {
    let (status, message) = match &err {
        CareerServiceError::Validation(validation) => {
            (StatusCode::BAD_REQUEST, validation.to_string())
        }
        CareerServiceError::OrganizationNotFound => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        CareerServiceError::QuotaExceeded => (StatusCode::BAD_REQUEST, err.to_string()),
        CareerServiceError::Directory(_) | CareerServiceError::Repository(_) => {
            error!(cause = %err, "career posting failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to add career".to_string(),
            )
        }
    };

    let body = json!({ "error": message });
    (status, axum::Json(body)).into_response()
}
