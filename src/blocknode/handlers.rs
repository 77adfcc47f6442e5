use std::sync::Arc;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Extension, Path},
};

use super::protocol::{NodeHealth, StoreBlockResponse};
use super::store::BlockStore;
use crate::error::DfsError;

pub fn router(store: Arc<BlockStore>) -> Router {
    Router::new()
        .route(
            "/block/:block_id",
            post(handle_store_block).get(handle_retrieve_block),
        )
        .route("/health", get(handle_health))
        .layer(DefaultBodyLimit::max(MAX_BLOCK_BYTES))
        .layer(Extension(store))
}

// Bounded by the coordinator's configured block size, which is not capped.
const MAX_BLOCK_BYTES: usize = 256 * 1024 * 1024;

pub async fn handle_store_block(
    Extension(store): Extension<Arc<BlockStore>>,
    Path(block_id): Path<String>,
    payload: Bytes,
) -> (StatusCode, Json<StoreBlockResponse>) {
    match store.store(&block_id, &payload).await {
        Ok(()) => {
            tracing::info!("stored block {} ({} bytes)", block_id, payload.len());
            (StatusCode::OK, Json(StoreBlockResponse { success: true }))
        }
        Err(DfsError::InvalidBlockId(id)) => {
            tracing::warn!("rejected invalid block id {:?}", id);
            (
                StatusCode::BAD_REQUEST,
                Json(StoreBlockResponse { success: false }),
            )
        }
        Err(e) => {
            tracing::error!("failed to store block {}: {}", block_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StoreBlockResponse { success: false }),
            )
        }
    }
}

pub async fn handle_retrieve_block(
    Extension(store): Extension<Arc<BlockStore>>,
    Path(block_id): Path<String>,
) -> Response {
    match store.retrieve(&block_id).await {
        Ok(payload) => (StatusCode::OK, payload).into_response(),
        Err(DfsError::BlockNotFound(_)) => {
            tracing::debug!("retrieve miss for block {}", block_id);
            (StatusCode::NOT_FOUND, "block not found").into_response()
        }
        Err(e) => {
            tracing::error!("failed to retrieve block {}: {}", block_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "retrieve failed").into_response()
        }
    }
}

pub async fn handle_health(
    Extension(store): Extension<Arc<BlockStore>>,
) -> (StatusCode, Json<NodeHealth>) {
    (
        StatusCode::OK,
        Json(NodeHealth {
            blocks: store.block_count(),
        }),
    )
}
