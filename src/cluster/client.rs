use std::time::Duration;

use bytes::Bytes;

use super::types::NodeAddress;
use crate::blocknode::protocol::StoreBlockResponse;
use crate::error::{DfsError, DfsResult};

const STORE_TIMEOUT: Duration = Duration::from_secs(10);
const RETRIEVE_TIMEOUT: Duration = Duration::from_secs(10);
const STORE_ATTEMPTS: usize = 3;

/// HTTP client for the block transfer endpoints of storage nodes.
///
/// Store calls retry transient transport errors with backoff; retrieve calls
/// get a single attempt, so the only read-path recovery is the caller's
/// primary -> replica fallback.
pub struct BlockNodeClient {
    http_client: reqwest::Client,
}

impl BlockNodeClient {
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
        }
    }

    /// Stores `payload` under `block_id` on `node`. Any failure, transport
    /// or reported by the node, maps to `StorageFailure` naming both.
    pub async fn store_block(
        &self,
        node: &NodeAddress,
        block_id: &str,
        payload: Bytes,
    ) -> DfsResult<()> {
        let url = node.block_url(block_id);

        let response = match self
            .post_with_retry(url, payload, STORE_TIMEOUT, STORE_ATTEMPTS)
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("store of block {} on {} failed: {}", block_id, node, e);
                return Err(storage_failure(node, block_id));
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "node {} rejected block {} with {}",
                node,
                block_id,
                response.status()
            );
            return Err(storage_failure(node, block_id));
        }

        let ack: StoreBlockResponse = response
            .json()
            .await
            .map_err(|_| storage_failure(node, block_id))?;
        if !ack.success {
            return Err(storage_failure(node, block_id));
        }

        Ok(())
    }

    /// Retrieves the complete payload of `block_id` from `node`.
    pub async fn retrieve_block(&self, node: &NodeAddress, block_id: &str) -> DfsResult<Bytes> {
        let url = node.block_url(block_id);

        let response = self
            .http_client
            .get(url)
            .timeout(RETRIEVE_TIMEOUT)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DfsError::BlockNotFound(block_id.to_string()));
        }
        if !response.status().is_success() {
            return Err(DfsError::Remote {
                reason: format!(
                    "retrieve of block {} from {} failed with {}",
                    block_id,
                    node,
                    response.status()
                ),
                retryable: true,
            });
        }

        Ok(response.bytes().await?)
    }

    async fn post_with_retry(
        &self,
        url: String,
        payload: Bytes,
        timeout: Duration,
        attempts: usize,
    ) -> DfsResult<reqwest::Response> {
        let mut delay_ms = 150u64;

        for attempt in 0..attempts {
            let response = self
                .http_client
                .post(url.clone())
                .body(payload.clone())
                .timeout(timeout)
                .send()
                .await;

            match response {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if attempt + 1 == attempts {
                        return Err(e.into());
                    }
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(1200);
                }
            }
        }

        Err(DfsError::Remote {
            reason: "retry attempts exhausted".to_string(),
            retryable: true,
        })
    }
}

impl Default for BlockNodeClient {
    fn default() -> Self {
        Self::new()
    }
}

fn storage_failure(node: &NodeAddress, block_id: &str) -> DfsError {
    DfsError::StorageFailure {
        node: *node,
        block_id: block_id.to_string(),
    }
}
