//! Cluster Topology Module
//!
//! Node addressing and the static roster of block store nodes.
//!
//! ## Core Concepts
//! - **Roster**: the ordered list of node addresses the coordinator knows at
//!   startup. Membership is immutable for the process lifetime; there is no
//!   join/leave protocol and no failure detection.
//! - **Transfer client**: the HTTP client used by the coordinator and the
//!   client orchestrator to move block payloads to and from nodes.

pub mod client;
pub mod roster;
pub mod types;

#[cfg(test)]
mod tests;
