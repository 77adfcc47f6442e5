//! Cluster Module Tests
//!
//! Validates node address parsing, transfer URL formatting, and roster
//! validation rules.

#[cfg(test)]
mod tests {
    use crate::cluster::roster::Roster;
    use crate::cluster::types::NodeAddress;
    use crate::error::DfsError;

    fn addr(s: &str) -> NodeAddress {
        s.parse().unwrap()
    }

    // ============================================================
    // NODE ADDRESS TESTS
    // ============================================================

    #[test]
    fn test_node_address_parse_and_display_roundtrip() {
        let node = addr("10.0.0.1:5001");
        assert_eq!(node.to_string(), "10.0.0.1:5001");
    }

    #[test]
    fn test_node_address_rejects_garbage() {
        assert!("not-an-address".parse::<NodeAddress>().is_err());
        assert!("10.0.0.1".parse::<NodeAddress>().is_err());
    }

    #[test]
    fn test_block_url_format() {
        let node = addr("10.0.0.1:5001");
        assert_eq!(
            node.block_url("report.txt_block_0"),
            "http://10.0.0.1:5001/block/report.txt_block_0"
        );
    }

    // ============================================================
    // ROSTER TESTS
    // ============================================================

    #[test]
    fn test_roster_preserves_order() {
        let nodes = vec![addr("127.0.0.1:5001"), addr("127.0.0.1:5002"), addr("127.0.0.1:5003")];
        let roster = Roster::new(nodes.clone()).unwrap();
        assert_eq!(roster.nodes(), &nodes[..]);
        assert_eq!(roster.len(), 3);
    }

    #[test]
    fn test_roster_requires_two_nodes() {
        let err = Roster::new(vec![addr("127.0.0.1:5001")]).unwrap_err();
        assert!(matches!(err, DfsError::InvalidRoster(_)));

        let err = Roster::new(vec![]).unwrap_err();
        assert!(matches!(err, DfsError::InvalidRoster(_)));
    }

    #[test]
    fn test_roster_rejects_duplicates() {
        let err = Roster::new(vec![
            addr("127.0.0.1:5001"),
            addr("127.0.0.1:5002"),
            addr("127.0.0.1:5001"),
        ])
        .unwrap_err();
        assert!(matches!(err, DfsError::InvalidRoster(_)));
    }

    #[test]
    fn test_roster_errors_are_not_retryable() {
        let err = Roster::new(vec![]).unwrap_err();
        assert!(!err.is_retryable());
    }
}
