//! System-wide constants for the darkpool node.

/// Default number of nodes per pool.
pub const DEFAULT_POOL_SIZE: usize = 24;

/// Default timeout for one discovery query during network formation.
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 60;

/// Default number of extra attempts when listing registered nodes for a
/// new epoch. Zero reproduces single-shot behavior (skip the epoch on the
/// first failure).
pub const DEFAULT_NODE_LIST_RETRIES: u32 = 3;

/// Default backoff between node-list attempts in milliseconds.
pub const DEFAULT_NODE_LIST_BACKOFF_MS: u64 = 500;

/// Capacity of the error and match-event streams handed to the
/// orchestration layer.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Node name.
pub const NODE_NAME: &str = "darkpool";
