//! Crate-wide error taxonomy.
//!
//! Every fallible operation returns a [`DfsError`] so failure paths are part
//! of each operation's contract instead of ambient panics. Transport errors
//! are carried alongside the domain failures they caused; callers treat them
//! the same way (fallback on download, abort on upload).

use std::io::Error as IoError;

use reqwest::Error as ReqError;
use thiserror::Error as ThisError;

use crate::cluster::types::NodeAddress;

pub type DfsResult<T> = Result<T, DfsError>;

#[derive(Debug, ThisError)]
pub enum DfsError {
    /// File name absent from the coordinator's catalog.
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// Block id absent from a node's index, or its backing file is gone.
    #[error("block not found: {0}")]
    BlockNotFound(String),

    /// A store call to a node failed (I/O or transport). The upload that
    /// triggered it fails as a whole; blocks already stored elsewhere stay.
    #[error("failed to store block {block_id} on node {node}")]
    StorageFailure { node: NodeAddress, block_id: String },

    /// Both primary and replica retrieve failed during a download.
    #[error("block {block_id} unavailable on primary and replica")]
    BlockUnavailable { block_id: String },

    /// Network-level failure talking to the coordinator or a node.
    #[error("transport error: {0}")]
    Transport(#[from] ReqError),

    #[error("io error: {0}")]
    Io(#[from] IoError),

    /// Roster rejected at startup (too few nodes, duplicate addresses).
    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    /// Block id that cannot be used as a storage file name.
    #[error("invalid block id: {0}")]
    InvalidBlockId(String),

    /// Failure reported by the coordinator over HTTP.
    #[error("coordinator reported failure: {reason}")]
    Remote { reason: String, retryable: bool },
}

impl DfsError {
    /// Whether a caller may reasonably retry the whole operation.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_)
            | Self::Io(_)
            | Self::StorageFailure { .. }
            | Self::BlockUnavailable { .. } => true,
            Self::Remote { retryable, .. } => *retryable,
            Self::FileNotFound(_)
            | Self::BlockNotFound(_)
            | Self::InvalidRoster(_)
            | Self::InvalidBlockId(_) => false,
        }
    }
}
