use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;

use super::placement::{BlockDescriptor, BlockPlanner};
use crate::cluster::client::BlockNodeClient;
use crate::cluster::roster::Roster;
use crate::error::{DfsError, DfsResult};

/// Authoritative file -> block descriptors table plus upload orchestration.
///
/// The table is the coordinator's only shared mutable state. A re-upload
/// under the same name replaces the whole entry atomically, so concurrent
/// uploads to one name race with last-writer-wins semantics and readers
/// never observe a half-written entry.
pub struct FileCatalog {
    files: DashMap<String, Vec<BlockDescriptor>>,
    planner: BlockPlanner,
    node_client: BlockNodeClient,
}

impl FileCatalog {
    pub fn new(roster: Arc<Roster>, block_size: u64) -> Self {
        Self {
            files: DashMap::new(),
            planner: BlockPlanner::new(roster, block_size),
            node_client: BlockNodeClient::new(),
        }
    }

    /// Splits `payload` into blocks and stores each on its primary, then its
    /// replica, in index order. The first failing store aborts the whole
    /// upload with `StorageFailure`; blocks already stored on other nodes
    /// are not rolled back, the failure is surfaced to the caller instead.
    /// Only on full success does the entry become visible to lookups.
    pub async fn ingest_file(
        &self,
        file_name: &str,
        payload: Bytes,
    ) -> DfsResult<Vec<BlockDescriptor>> {
        let blocks = self.planner.plan(file_name, payload.len() as u64);

        for block in &blocks {
            let range = block.offset as usize..(block.offset + block.size) as usize;
            let chunk = payload.slice(range);

            self.node_client
                .store_block(&block.primary_node, &block.id, chunk.clone())
                .await?;
            self.node_client
                .store_block(&block.replica_node, &block.id, chunk)
                .await?;

            tracing::debug!(
                "block {} stored on {} and {}",
                block.id,
                block.primary_node,
                block.replica_node
            );
        }

        self.files.insert(file_name.to_string(), blocks.clone());
        tracing::info!(
            "file {} registered with {} blocks",
            file_name,
            blocks.len()
        );

        Ok(blocks)
    }

    /// Ordered descriptor list for `file_name`, or `FileNotFound`.
    pub fn lookup(&self, file_name: &str) -> DfsResult<Vec<BlockDescriptor>> {
        self.files
            .get(file_name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| DfsError::FileNotFound(file_name.to_string()))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn block_size(&self) -> u64 {
        self.planner.block_size()
    }
}
