//! The registry boundary.
//!
//! Registration, bonding, and epoch advancement live on-chain; the node
//! only ever consumes them through this trait. Implementations wrap the
//! actual contract binding (or a simulator in tests).

use darkpool_types::{Epoch, NodeAddress, Result};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Read-only view of the on-chain node registry.
pub trait Registry: Send + Sync + 'static {
    /// Resolve once this node's registration is confirmed for the coming
    /// epoch. An error here means the node cannot participate at all.
    fn wait_until_registered(
        &self,
        addr: &NodeAddress,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Stream epoch transitions until `cancel` fires.
    ///
    /// Transient registry problems are surfaced as `Err` items on the
    /// stream; the stream itself closing means the watch must be
    /// re-established.
    fn watch_epochs(&self, cancel: CancellationToken) -> mpsc::Receiver<Result<Epoch>>;

    /// The full registered node set for the current epoch.
    fn registered_nodes(&self) -> impl Future<Output = Result<Vec<NodeAddress>>> + Send;
}
