use super::types::NodeAddress;
use crate::error::{DfsError, DfsResult};

/// Static, ordered list of known block store node addresses.
///
/// Validated once at startup; with replication fixed at one primary plus one
/// replica, placement needs at least two distinct nodes. Order matters: the
/// placement algorithm rotates over it by block index.
#[derive(Debug, Clone)]
pub struct Roster {
    nodes: Vec<NodeAddress>,
}

impl Roster {
    pub fn new(nodes: Vec<NodeAddress>) -> DfsResult<Self> {
        if nodes.len() < 2 {
            return Err(DfsError::InvalidRoster(format!(
                "primary/replica placement needs at least 2 nodes, got {}",
                nodes.len()
            )));
        }

        for (i, node) in nodes.iter().enumerate() {
            if nodes[..i].contains(node) {
                return Err(DfsError::InvalidRoster(format!(
                    "duplicate node address {}",
                    node
                )));
            }
        }

        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[NodeAddress] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
