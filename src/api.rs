//! HTTP interface over a shared [`MediaStore`].
//!
//! Each handler calls exactly one store operation and maps its outcome to a
//! status code. Path parameters arrive percent-decoded.

use crate::error::Error;
use crate::record::{MediaDraft, MediaRecord};
use crate::store::MediaStore;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State handed to every handler.
pub type AppState = Arc<MediaStore>;

/// Handler result.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Build the `/media` routes around `store`.
pub fn router(store: AppState) -> Router {
    Router::new()
        .route("/media", get(list_all_media).post(create_media))
        .route("/media/search", get(search_by_name))
        .route("/media/category/{category}", get(list_by_category))
        .route("/media/{name}", get(get_media).delete(delete_media))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Run a store call off the async workers. Every store operation takes a
/// blocking lock that a writer may hold across disk I/O.
async fn blocking<T, F>(store: AppState, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&MediaStore) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&*store))
        .await
        .map_err(|e| ApiError::internal(e.to_string()))
}

async fn list_all_media(State(store): State<AppState>) -> ApiResult<Json<Vec<MediaRecord>>> {
    Ok(Json(blocking(store, |s| s.list_all()).await?))
}

async fn list_by_category(
    State(store): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Json<Vec<MediaRecord>>> {
    Ok(Json(
        blocking(store, move |s| s.list_by_category(&category)).await?,
    ))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    name: Option<String>,
}

async fn search_by_name(
    State(store): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<MediaRecord>>> {
    let name = params
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::bad_request("missing 'name' query parameter"))?;
    let found = blocking(store, move |s| s.find_by_exact_name(&name)).await?;
    Ok(Json(found.into_iter().collect()))
}

async fn get_media(
    State(store): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<MediaRecord>> {
    Ok(Json(blocking(store, move |s| s.get(&name)).await??))
}

async fn create_media(
    State(store): State<AppState>,
    payload: Result<Json<MediaDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MediaRecord>)> {
    let Json(draft) = payload?;
    let record = blocking(store, move |s| s.create(draft)).await??;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn delete_media(
    State(store): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<MediaRecord>> {
    Ok(Json(blocking(store, move |s| s.delete(&name)).await??))
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// An error ready to be sent as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError {
    /// Response status.
    pub status: StatusCode,
    /// Human-readable reason.
    pub message: String,
}

impl ApiError {
    /// Error with an explicit status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 404.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 500.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if !err.is_client_error() {
            tracing::error!(error = %err, "request failed");
            return Self::internal(err.to_string());
        }
        match err {
            Error::NotFound(_) => Self::not_found(err.message()),
            // Duplicates are reported as bad input, same as field errors.
            _ => Self::bad_request(err.message()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(format!("invalid JSON body: {}", rejection.body_text()))
    }
}
