use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cluster::roster::Roster;
use crate::cluster::types::NodeAddress;

/// Default block size in bytes (128 * 128).
pub const DEFAULT_BLOCK_SIZE: u64 = 128 * 128;

/// One block of a file: its byte range and where it lives.
///
/// Descriptors for a file are totally ordered by `index` with strictly
/// increasing `offset`, and `primary_node != replica_node` for every block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockDescriptor {
    pub id: String,
    pub file_name: String,
    pub index: u64,
    pub offset: u64,
    pub size: u64,
    pub primary_node: NodeAddress,
    pub replica_node: NodeAddress,
}

/// Computes the block layout and node assignment for a file.
///
/// The policy is static and content-independent: round-robin primaries
/// spread load evenly across the roster, and the replica rotates among the
/// remaining nodes so replicas spread too and never land on the primary.
pub struct BlockPlanner {
    block_size: u64,
    roster: Arc<Roster>,
}

impl BlockPlanner {
    pub fn new(roster: Arc<Roster>, block_size: u64) -> Self {
        Self { block_size, roster }
    }

    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Ordered descriptor list covering `[0, file_size)` contiguously.
    /// A zero-byte file produces no blocks.
    pub fn plan(&self, file_name: &str, file_size: u64) -> Vec<BlockDescriptor> {
        let nodes = self.roster.nodes();
        let num_blocks = file_size.div_ceil(self.block_size);
        let mut blocks = Vec::with_capacity(num_blocks as usize);

        for index in 0..num_blocks {
            let primary_index = (index as usize) % nodes.len();
            let primary_node = nodes[primary_index];

            let candidates: Vec<NodeAddress> = nodes
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != primary_index)
                .map(|(_, node)| *node)
                .collect();
            let replica_node = candidates[(index as usize + 1) % candidates.len()];

            let offset = index * self.block_size;
            blocks.push(BlockDescriptor {
                id: block_id(file_name, index),
                file_name: file_name.to_string(),
                index,
                offset,
                size: (file_size - offset).min(self.block_size),
                primary_node,
                replica_node,
            });
        }

        blocks
    }
}

/// Globally unique block id, derived from the file name and block index.
pub fn block_id(file_name: &str, index: u64) -> String {
    format!("{}_block_{}", file_name, index)
}
