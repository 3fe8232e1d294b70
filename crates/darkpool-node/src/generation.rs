//! The two-slot generation ring.
//!
//! Epochs overlap: when epoch `e+1` starts, epoch `e` keeps computing
//! until `e+2` arrives, so in-flight computations near an epoch boundary
//! can finish on either side. The ring holds the two live generations and
//! makes retirement explicit: inserting a generation returns the one that
//! just became two epochs old.

use darkpool_types::{EpochHash, NetworkId};
use tokio_util::sync::CancellationToken;

/// One epoch's running footprint: its computation network and the token
/// that stops every task started for it.
#[derive(Debug)]
pub struct Generation {
    pub epoch_hash: EpochHash,
    pub network_id: NetworkId,
    pub cancel: CancellationToken,
}

/// At most two live generations, previous and current.
#[derive(Debug, Default)]
pub struct GenerationRing {
    prev: Option<Generation>,
    curr: Option<Generation>,
}

impl GenerationRing {
    /// Install `next` as the current generation.
    ///
    /// Returns the generation displaced out of the ring, which the caller
    /// must tear down. `next` is already live when this is called, so the
    /// ring never momentarily holds zero generations.
    pub fn advance(&mut self, next: Generation) -> Option<Generation> {
        let retired = self.prev.take();
        self.prev = self.curr.take();
        self.curr = Some(next);
        retired
    }

    /// Drain both generations for final teardown.
    pub fn retire_all(&mut self) -> Vec<Generation> {
        self.prev.take().into_iter().chain(self.curr.take()).collect()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Generation> {
        self.curr.as_ref()
    }

    #[must_use]
    pub fn live(&self) -> usize {
        usize::from(self.prev.is_some()) + usize::from(self.curr.is_some())
    }
}
