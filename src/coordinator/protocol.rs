//! Coordinator Wire Protocol
//!
//! Endpoints and DTOs of the coordinator's HTTP surface. File content
//! travels as a raw request body; metadata responses are JSON.

use serde::{Deserialize, Serialize};

use super::placement::BlockDescriptor;
use crate::cluster::types::NodeAddress;

// --- API Endpoints ---

/// Upload entry point (`POST /upload/{file_name}`, body = file bytes).
pub const ENDPOINT_UPLOAD: &str = "/upload";
/// Lookup entry point (`GET /files/{file_name}`).
pub const ENDPOINT_FILES: &str = "/files";
/// Liveness and stats endpoint.
pub const ENDPOINT_HEALTH: &str = "/health";

// --- Data Transfer Objects ---

/// One block as exposed to clients.
///
/// Lookup responses also carry the resolvable transfer URIs for both copies
/// so a client can fetch block bytes without knowing the node URL scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockInfo {
    pub id: String,
    pub index: u64,
    pub offset: u64,
    pub size: u64,
    pub primary_node: NodeAddress,
    pub replica_node: NodeAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_uri: Option<String>,
}

impl BlockInfo {
    pub fn from_descriptor(block: &BlockDescriptor) -> Self {
        Self {
            id: block.id.clone(),
            index: block.index,
            offset: block.offset,
            size: block.size,
            primary_node: block.primary_node,
            replica_node: block.replica_node,
            primary_uri: None,
            replica_uri: None,
        }
    }

    pub fn with_transfer_uris(block: &BlockDescriptor) -> Self {
        Self {
            primary_uri: Some(block.primary_node.block_url(&block.id)),
            replica_uri: Some(block.replica_node.block_url(&block.id)),
            ..Self::from_descriptor(block)
        }
    }
}

/// Response for a successful upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub blocks_info: Vec<BlockInfo>,
}

/// Response for a successful lookup.
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResponse {
    pub blocks_info: Vec<BlockInfo>,
}

/// Error body returned on any failed coordinator operation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Whether retrying the whole operation may succeed.
    pub retryable: bool,
}

/// Response format for the health endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoordinatorHealth {
    /// Number of files currently registered in the catalog.
    pub files: usize,
}
