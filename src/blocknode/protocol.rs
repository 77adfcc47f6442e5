//! Block Transfer Protocol
//!
//! Endpoints and DTOs of a block store node's HTTP surface. Payloads travel
//! as raw request/response bodies; only acknowledgements are JSON.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Block transfer endpoint; POST stores, GET retrieves (`/block/{block_id}`).
pub const ENDPOINT_BLOCK: &str = "/block";
/// Liveness and stats endpoint.
pub const ENDPOINT_HEALTH: &str = "/health";

// --- Data Transfer Objects ---

/// Acknowledgement for a store call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StoreBlockResponse {
    pub success: bool,
}

/// Response format for the health endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NodeHealth {
    /// Number of blocks currently indexed on this node.
    pub blocks: usize,
}
