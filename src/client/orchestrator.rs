use std::io::{Error as IoError, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use tokio::io::AsyncWriteExt;

use crate::cluster::client::BlockNodeClient;
use crate::coordinator::protocol::{
    BlockInfo, ENDPOINT_FILES, ENDPOINT_UPLOAD, ErrorResponse, LookupResponse, UploadResponse,
};
use crate::error::{DfsError, DfsResult};

const COORDINATOR_TIMEOUT: Duration = Duration::from_secs(30);

/// Client-side orchestrator for one coordinator.
pub struct DfsClient {
    coordinator_url: String,
    http_client: reqwest::Client,
    node_client: BlockNodeClient,
}

impl DfsClient {
    pub fn new(coordinator_url: &str) -> Self {
        Self {
            coordinator_url: coordinator_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
            node_client: BlockNodeClient::new(),
        }
    }

    /// Uploads the file at `local_path` under its base name and returns the
    /// block descriptor list the coordinator produced.
    pub async fn upload(&self, local_path: &Path) -> DfsResult<UploadResponse> {
        let file_name = local_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| IoError::new(ErrorKind::InvalidInput, "path has no file name"))?;
        let payload = tokio::fs::read(local_path).await?;

        tracing::info!(
            "uploading {} ({} bytes) to {}",
            file_name,
            payload.len(),
            self.coordinator_url
        );

        let url = format!("{}{}/{}", self.coordinator_url, ENDPOINT_UPLOAD, file_name);
        let response = self
            .http_client
            .post(url)
            .body(payload)
            .timeout(COORDINATOR_TIMEOUT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(remote_failure(response).await);
        }

        Ok(response.json::<UploadResponse>().await?)
    }

    /// Downloads `file_name` into `dest_dir`, reconstructing the original
    /// byte stream block by block in ascending index order. If a block fails
    /// on both its primary and its replica the download aborts with
    /// `BlockUnavailable`, leaving the partially written file on disk.
    pub async fn download(&self, file_name: &str, dest_dir: &Path) -> DfsResult<PathBuf> {
        let url = format!("{}{}/{}", self.coordinator_url, ENDPOINT_FILES, file_name);
        let response = self
            .http_client
            .get(url)
            .timeout(COORDINATOR_TIMEOUT)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DfsError::FileNotFound(file_name.to_string()));
        }
        if !response.status().is_success() {
            return Err(remote_failure(response).await);
        }

        let mut blocks = response.json::<LookupResponse>().await?.blocks_info;
        blocks.sort_by_key(|block| block.index);

        for block in &blocks {
            tracing::info!(
                "block {}: primary {} replica {}",
                block.id,
                block.primary_uri.as_deref().unwrap_or("?"),
                block.replica_uri.as_deref().unwrap_or("?")
            );
        }

        let dest_path = dest_dir.join(file_name);
        let mut dest = tokio::fs::File::create(&dest_path).await?;

        for block in &blocks {
            let payload = self.fetch_block(block).await?;
            dest.write_all(&payload).await?;
        }
        dest.flush().await?;

        tracing::info!("file {} reconstructed at {}", file_name, dest_path.display());
        Ok(dest_path)
    }

    // Primary first, replica on any failure; both failing makes the block
    // unavailable and aborts the download.
    async fn fetch_block(&self, block: &BlockInfo) -> DfsResult<Bytes> {
        match self
            .node_client
            .retrieve_block(&block.primary_node, &block.id)
            .await
        {
            Ok(payload) => Ok(payload),
            Err(primary_err) => {
                tracing::warn!(
                    "primary {} failed for block {} ({}), trying replica {}",
                    block.primary_node,
                    block.id,
                    primary_err,
                    block.replica_node
                );

                self.node_client
                    .retrieve_block(&block.replica_node, &block.id)
                    .await
                    .map_err(|replica_err| {
                        tracing::error!(
                            "replica {} also failed for block {}: {}",
                            block.replica_node,
                            block.id,
                            replica_err
                        );
                        DfsError::BlockUnavailable {
                            block_id: block.id.clone(),
                        }
                    })
            }
        }
    }
}

async fn remote_failure(response: reqwest::Response) -> DfsError {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => DfsError::Remote {
            reason: body.error,
            retryable: body.retryable,
        },
        Err(_) => DfsError::Remote {
            reason: format!("coordinator returned {}", status),
            retryable: status.is_server_error(),
        },
    }
}
