use std::sync::Arc;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Extension, Path},
};

use super::catalog::FileCatalog;
use super::protocol::{
    BlockInfo, CoordinatorHealth, ErrorResponse, LookupResponse, UploadResponse,
};

pub fn router(catalog: Arc<FileCatalog>) -> Router {
    Router::new()
        .route("/upload/:file_name", post(handle_upload))
        .route("/files/:file_name", get(handle_lookup))
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(Extension(catalog))
}

// Whole files arrive as one request body.
const MAX_UPLOAD_BYTES: usize = 1024 * 1024 * 1024;

pub async fn handle_upload(
    Extension(catalog): Extension<Arc<FileCatalog>>,
    Path(file_name): Path<String>,
    payload: Bytes,
) -> Result<Json<UploadResponse>, (StatusCode, Json<ErrorResponse>)> {
    match catalog.ingest_file(&file_name, payload).await {
        Ok(blocks) => Ok(Json(UploadResponse {
            message: format!("File {} uploaded successfully", file_name),
            blocks_info: blocks.iter().map(BlockInfo::from_descriptor).collect(),
        })),
        Err(e) => {
            tracing::error!("upload of {} failed: {}", file_name, e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                    retryable: e.is_retryable(),
                }),
            ))
        }
    }
}

pub async fn handle_lookup(
    Extension(catalog): Extension<Arc<FileCatalog>>,
    Path(file_name): Path<String>,
) -> Result<Json<LookupResponse>, (StatusCode, Json<ErrorResponse>)> {
    match catalog.lookup(&file_name) {
        Ok(blocks) => Ok(Json(LookupResponse {
            blocks_info: blocks.iter().map(BlockInfo::with_transfer_uris).collect(),
        })),
        Err(e) => {
            tracing::debug!("lookup miss for {}", file_name);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: e.to_string(),
                    retryable: false,
                }),
            ))
        }
    }
}

pub async fn handle_health(
    Extension(catalog): Extension<Arc<FileCatalog>>,
) -> (StatusCode, Json<CoordinatorHealth>) {
    (
        StatusCode::OK,
        Json(CoordinatorHealth {
            files: catalog.file_count(),
        }),
    )
}
