//! Configuration types for darkpool nodes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{NodeAddress, constants};

/// Configuration for a single darkpool node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// This node's identity in the network.
    pub address: NodeAddress,
    /// Computation-network formation settings.
    pub network: NetworkConfig,
    /// Epoch lifecycle settings.
    pub epoch: EpochConfig,
}

impl NodeConfig {
    #[must_use]
    pub fn new(address: NodeAddress) -> Self {
        Self {
            address,
            network: NetworkConfig::default(),
            epoch: EpochConfig::default(),
        }
    }
}

/// Computation-network formation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Timeout for one discovery query during connect.
    pub query_timeout: Duration,
    /// Capacity of the error and match streams.
    pub channel_capacity: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            query_timeout: Duration::from_secs(constants::DEFAULT_QUERY_TIMEOUT_SECS),
            channel_capacity: constants::DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Epoch lifecycle settings.
///
/// The node-list retry policy is explicit: when listing the registered node
/// set fails at an epoch boundary, the node retries `node_list_retries`
/// times with `node_list_backoff` in between before skipping the epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochConfig {
    /// Nodes per pool.
    pub pool_size: usize,
    /// Extra attempts when listing registered nodes for a new epoch.
    pub node_list_retries: u32,
    /// Backoff between node-list attempts.
    pub node_list_backoff: Duration,
}

impl Default for EpochConfig {
    fn default() -> Self {
        Self {
            pool_size: constants::DEFAULT_POOL_SIZE,
            node_list_retries: constants::DEFAULT_NODE_LIST_RETRIES,
            node_list_backoff: Duration::from_millis(constants::DEFAULT_NODE_LIST_BACKOFF_MS),
        }
    }
}
