//! Coordinator Tests
//!
//! Validates the partitioning and placement algorithm, and the catalog's
//! upload orchestration against block nodes served on ephemeral ports.
//!
//! *Note: full scatter/gather round-trips through the client orchestrator
//! are covered in the client module tests.*

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bytes::Bytes;

    use crate::blocknode::handlers as blocknode_handlers;
    use crate::blocknode::store::BlockStore;
    use crate::cluster::roster::Roster;
    use crate::cluster::types::NodeAddress;
    use crate::coordinator::catalog::FileCatalog;
    use crate::coordinator::placement::{BlockPlanner, block_id, DEFAULT_BLOCK_SIZE};
    use crate::coordinator::protocol::BlockInfo;
    use crate::error::DfsError;

    fn addr(s: &str) -> NodeAddress {
        s.parse().unwrap()
    }

    fn three_node_roster() -> Arc<Roster> {
        Arc::new(
            Roster::new(vec![
                addr("127.0.0.1:5001"),
                addr("127.0.0.1:5002"),
                addr("127.0.0.1:5003"),
            ])
            .unwrap(),
        )
    }

    // ============================================================
    // PLANNER TESTS
    // ============================================================

    #[test]
    fn test_plan_covers_file_exactly() {
        let planner = BlockPlanner::new(three_node_roster(), 4);

        for file_size in [0u64, 1, 3, 4, 5, 8, 10, 17, 4096] {
            let blocks = planner.plan("f", file_size);

            assert_eq!(blocks.len() as u64, file_size.div_ceil(4));

            let mut expected_offset = 0;
            for (i, block) in blocks.iter().enumerate() {
                assert_eq!(block.index as usize, i);
                assert_eq!(block.offset, expected_offset);
                assert!(block.size >= 1 && block.size <= 4);
                expected_offset += block.size;
            }
            assert_eq!(
                blocks.iter().map(|b| b.size).sum::<u64>(),
                file_size,
                "sizes must sum to the file size for {}",
                file_size
            );
        }
    }

    #[test]
    fn test_plan_empty_file_has_no_blocks() {
        let planner = BlockPlanner::new(three_node_roster(), 4);
        assert!(planner.plan("empty", 0).is_empty());
    }

    #[test]
    fn test_plan_exact_multiple_has_no_short_tail() {
        let planner = BlockPlanner::new(three_node_roster(), 4);
        let blocks = planner.plan("f", 8);

        assert_eq!(blocks.len(), 2);
        assert!(blocks.iter().all(|b| b.size == 4));
    }

    #[test]
    fn test_plan_placement_invariants() {
        let roster = three_node_roster();
        let planner = BlockPlanner::new(roster.clone(), 4);
        let blocks = planner.plan("f", 100);

        for block in &blocks {
            assert_ne!(block.primary_node, block.replica_node);
            assert!(roster.nodes().contains(&block.primary_node));
            assert!(roster.nodes().contains(&block.replica_node));
        }
    }

    #[test]
    fn test_plan_three_node_worked_example() {
        // roster [A, B, C], block size 4, 10-byte file -> 3 blocks.
        let roster = three_node_roster();
        let [a, b, c] = [roster.nodes()[0], roster.nodes()[1], roster.nodes()[2]];
        let planner = BlockPlanner::new(roster, 4);

        let blocks = planner.plan("x", 10);
        assert_eq!(blocks.len(), 3);

        assert_eq!(blocks[0].id, "x_block_0");
        assert_eq!((blocks[0].offset, blocks[0].size), (0, 4));
        assert_eq!((blocks[0].primary_node, blocks[0].replica_node), (a, c));

        assert_eq!(blocks[1].id, "x_block_1");
        assert_eq!((blocks[1].offset, blocks[1].size), (4, 4));
        assert_eq!((blocks[1].primary_node, blocks[1].replica_node), (b, a));

        assert_eq!(blocks[2].id, "x_block_2");
        assert_eq!((blocks[2].offset, blocks[2].size), (8, 2));
        assert_eq!((blocks[2].primary_node, blocks[2].replica_node), (c, b));
    }

    #[test]
    fn test_plan_two_node_roster_alternates() {
        let roster = Arc::new(
            Roster::new(vec![addr("127.0.0.1:5001"), addr("127.0.0.1:5002")]).unwrap(),
        );
        let [a, b] = [roster.nodes()[0], roster.nodes()[1]];
        let planner = BlockPlanner::new(roster, 4);

        let blocks = planner.plan("f", 16);
        // With one candidate left, the replica is always the other node.
        assert_eq!((blocks[0].primary_node, blocks[0].replica_node), (a, b));
        assert_eq!((blocks[1].primary_node, blocks[1].replica_node), (b, a));
        assert_eq!((blocks[2].primary_node, blocks[2].replica_node), (a, b));
        assert_eq!((blocks[3].primary_node, blocks[3].replica_node), (b, a));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let planner = BlockPlanner::new(three_node_roster(), 4);
        assert_eq!(planner.plan("f", 100), planner.plan("f", 100));
    }

    #[test]
    fn test_block_id_format() {
        assert_eq!(block_id("report.txt", 0), "report.txt_block_0");
        assert_eq!(block_id("report.txt", 12), "report.txt_block_12");
    }

    #[test]
    fn test_default_block_size_constant() {
        assert_eq!(DEFAULT_BLOCK_SIZE, 16384);
    }

    // ============================================================
    // WIRE FORMAT TESTS
    // ============================================================

    #[test]
    fn test_block_info_wire_format() {
        let planner = BlockPlanner::new(three_node_roster(), 4);
        let blocks = planner.plan("x", 10);

        // Upload responses carry no transfer URIs; the field is omitted.
        let bare = serde_json::to_value(BlockInfo::from_descriptor(&blocks[0])).unwrap();
        assert_eq!(bare["id"], "x_block_0");
        assert_eq!(bare["primary_node"], "127.0.0.1:5001");
        assert!(bare.get("primary_uri").is_none());

        // Lookup responses resolve both copies to transfer endpoints.
        let resolved = serde_json::to_value(BlockInfo::with_transfer_uris(&blocks[0])).unwrap();
        assert_eq!(
            resolved["primary_uri"],
            "http://127.0.0.1:5001/block/x_block_0"
        );
        assert_eq!(
            resolved["replica_uri"],
            "http://127.0.0.1:5003/block/x_block_0"
        );

        let roundtrip: BlockInfo = serde_json::from_value(bare).unwrap();
        assert_eq!(roundtrip.primary_node, blocks[0].primary_node);
        assert!(roundtrip.primary_uri.is_none());
    }

    // ============================================================
    // CATALOG TESTS (Upload Orchestration)
    // ============================================================

    async fn spawn_blocknode() -> (NodeAddress, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(BlockStore::open(dir.path()).await.unwrap());
        let app = blocknode_handlers::router(store);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (NodeAddress(addr), dir)
    }

    #[tokio::test]
    async fn test_ingest_publishes_blocks_and_lookup_is_idempotent() {
        let (node_a, dir_a) = spawn_blocknode().await;
        let (node_b, dir_b) = spawn_blocknode().await;

        let roster = Arc::new(Roster::new(vec![node_a, node_b]).unwrap());
        let catalog = FileCatalog::new(roster, 4);

        let blocks = catalog
            .ingest_file("report.txt", Bytes::from_static(b"0123456789"))
            .await
            .unwrap();
        assert_eq!(blocks.len(), 3);

        // Every block landed on both its primary and its replica.
        for dir in [&dir_a, &dir_b] {
            for block in &blocks {
                assert!(dir.path().join(&block.id).exists());
            }
        }

        let first = catalog.lookup("report.txt").unwrap();
        let second = catalog.lookup("report.txt").unwrap();
        assert_eq!(first, blocks);
        assert_eq!(first, second);
        assert_eq!(catalog.file_count(), 1);
    }

    #[tokio::test]
    async fn test_lookup_unknown_file() {
        let (node_a, _dir_a) = spawn_blocknode().await;
        let (node_b, _dir_b) = spawn_blocknode().await;

        let catalog = FileCatalog::new(Arc::new(Roster::new(vec![node_a, node_b]).unwrap()), 4);

        let err = catalog.lookup("missing.txt").unwrap_err();
        assert!(matches!(err, DfsError::FileNotFound(name) if name == "missing.txt"));
    }

    #[tokio::test]
    async fn test_ingest_failure_names_node_and_block() {
        let (live, _dir) = spawn_blocknode().await;
        // Nothing listens on the discard port; the replica store must fail.
        let dead: NodeAddress = "127.0.0.1:9".parse().unwrap();

        let catalog = FileCatalog::new(Arc::new(Roster::new(vec![live, dead]).unwrap()), 4);

        let err = catalog
            .ingest_file("x", Bytes::from_static(b"0123"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, DfsError::StorageFailure { node, block_id } if node == dead && block_id == "x_block_0")
        );

        // The failed upload never becomes visible to lookups.
        assert!(matches!(
            catalog.lookup("x").unwrap_err(),
            DfsError::FileNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_reupload_replaces_catalog_entry() {
        let (node_a, _dir_a) = spawn_blocknode().await;
        let (node_b, _dir_b) = spawn_blocknode().await;

        let catalog = FileCatalog::new(Arc::new(Roster::new(vec![node_a, node_b]).unwrap()), 4);

        catalog
            .ingest_file("f", Bytes::from_static(b"old"))
            .await
            .unwrap();
        assert_eq!(catalog.lookup("f").unwrap().len(), 1);

        catalog
            .ingest_file("f", Bytes::from_static(b"new longer content"))
            .await
            .unwrap();

        let blocks = catalog.lookup("f").unwrap();
        assert_eq!(blocks.len() as u64, 18u64.div_ceil(4));
        assert_eq!(blocks.iter().map(|b| b.size).sum::<u64>(), 18);
        assert_eq!(catalog.file_count(), 1);
    }
}
