use std::path::{Path, PathBuf};

use bytes::Bytes;
use dashmap::DashMap;

use crate::error::{DfsError, DfsResult};

/// Disk-backed block storage for a single node.
///
/// Payloads are written to `storage_root/<block_id>` and tracked in an
/// in-memory index. Blocks are never deleted; a stored block only goes away
/// with the node's storage.
pub struct BlockStore {
    storage_root: PathBuf,
    index: DashMap<String, PathBuf>,
}

impl BlockStore {
    pub async fn open(storage_root: impl Into<PathBuf>) -> DfsResult<Self> {
        let storage_root = storage_root.into();
        tokio::fs::create_dir_all(&storage_root).await?;

        Ok(Self {
            storage_root,
            index: DashMap::new(),
        })
    }

    /// Writes `payload` under `block_id`, replacing any previous payload for
    /// the same id (last writer wins, no versioning).
    pub async fn store(&self, block_id: &str, payload: &[u8]) -> DfsResult<()> {
        let path = self.block_path(block_id)?;
        tokio::fs::write(&path, payload).await?;
        self.index.insert(block_id.to_string(), path);
        Ok(())
    }

    /// Returns the complete payload of `block_id`, or `BlockNotFound` if the
    /// id was never stored here or its backing file no longer exists.
    pub async fn retrieve(&self, block_id: &str) -> DfsResult<Bytes> {
        let path = match self.index.get(block_id) {
            Some(entry) => entry.value().clone(),
            None => return Err(DfsError::BlockNotFound(block_id.to_string())),
        };

        match tokio::fs::read(&path).await {
            Ok(payload) => Ok(Bytes::from(payload)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DfsError::BlockNotFound(block_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn contains(&self, block_id: &str) -> bool {
        self.index.contains_key(block_id)
    }

    pub fn block_count(&self) -> usize {
        self.index.len()
    }

    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    // Block ids become file names directly; anything that could escape the
    // storage root is rejected.
    fn block_path(&self, block_id: &str) -> DfsResult<PathBuf> {
        if block_id.is_empty() || block_id.contains(['/', '\\']) || block_id.contains("..") {
            return Err(DfsError::InvalidBlockId(block_id.to_string()));
        }
        Ok(self.storage_root.join(block_id))
    }
}
