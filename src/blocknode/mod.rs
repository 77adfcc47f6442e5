//! Block Store Node Module
//!
//! Durable (for the process lifetime) storage and retrieval of opaque block
//! payloads, addressed by block id.
//!
//! ## Core Concepts
//! - **Storage root**: every payload lands in a file under the node's root
//!   directory, named by its block id.
//! - **Block index**: an in-memory map from block id to its on-disk location,
//!   rebuilt empty on every start (no persistence across restarts).
//! - **Contract**: a store either succeeds or returns a failure result; the
//!   node never crashes on a bad request. A second store of the same id
//!   replaces the payload in place.

pub mod handlers;
pub mod protocol;
pub mod store;
