//! Distributed File Store Library
//!
//! This library crate defines the core modules of a simplified HDFS-style
//! storage layer. It serves as the foundation for the binary executable
//! (`main.rs`), which runs each component as its own process.
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems:
//!
//! - **`cluster`**: Node addressing and the static roster of block store
//!   nodes, plus the HTTP client that moves block payloads between
//!   processes. Membership is fixed at startup; there is no gossip, no
//!   failure detection and no rebalancing.
//! - **`coordinator`**: The metadata service. Splits files into fixed-size
//!   blocks, assigns each block a primary and a replica node, orchestrates
//!   the scatter of store calls on upload, and answers block-map lookups.
//! - **`blocknode`**: The storage node. Persists opaque block payloads under
//!   its storage root and serves them back by block id.
//! - **`client`**: The client orchestrator. Uploads local files and
//!   reconstructs downloads block by block with primary -> replica fallback.

pub mod blocknode;
pub mod client;
pub mod cluster;
pub mod coordinator;
pub mod error;
