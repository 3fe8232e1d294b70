//! The pluggable computation capability.

use darkpool_types::{Delta, NetworkId, Pool};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Runs one pool's secure computation for one epoch.
///
/// The lifecycle manager starts a run per generation and consumes the
/// resulting stream of reconstructed [`Delta`]s; match detection happens
/// on the consuming side. A run ends, closing its stream, when `cancel`
/// fires or the pool has nothing left to compute.
pub trait Computer: Send + Sync + 'static {
    fn run(
        &self,
        cancel: CancellationToken,
        network_id: NetworkId,
        pool: Pool,
    ) -> mpsc::Receiver<Delta>;
}
