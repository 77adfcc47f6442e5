use std::fmt;
use std::net::{AddrParseError, SocketAddr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::blocknode::protocol::ENDPOINT_BLOCK;

/// `host:port` address of a block store node.
///
/// Serialized on the wire as the plain `host:port` string, matching how the
/// roster is written in configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct NodeAddress(pub SocketAddr);

impl NodeAddress {
    /// Transfer endpoint for `block_id` on this node.
    pub fn block_url(&self, block_id: &str) -> String {
        format!("http://{}{}/{}", self.0, ENDPOINT_BLOCK, block_id)
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for NodeAddress {
    type Err = AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}
