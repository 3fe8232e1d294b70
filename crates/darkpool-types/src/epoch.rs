//! Epochs and pools.
//!
//! An epoch is identified by a chain-derived hash and fixes pool membership
//! for its lifetime. Pools are ordered groups of node addresses; each pool
//! runs exactly one computation network per epoch, identified by a
//! deterministic hash of the epoch and the pool index.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{EpochHash, NetworkId, NodeAddress};

/// One observed epoch. The registry contract advances these; the node only
/// ever consumes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Epoch {
    pub hash: EpochHash,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Pool
// ---------------------------------------------------------------------------

/// A deterministically assigned, ordered group of nodes that jointly run
/// one secure-computation network. Membership is immutable for the epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub index: usize,
    pub addresses: Vec<NodeAddress>,
}

impl Pool {
    #[must_use]
    pub fn contains(&self, addr: &NodeAddress) -> bool {
        self.addresses.iter().any(|a| a == addr)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// The computation network this pool runs during `epoch_hash`.
    ///
    /// Derived, not negotiated: every member computes the same id.
    #[must_use]
    pub fn network_id(&self, epoch_hash: &EpochHash) -> NetworkId {
        let mut hasher = Sha256::new();
        hasher.update(b"darkpool:network:v1:");
        hasher.update(epoch_hash.0);
        hasher.update((self.index as u64).to_le_bytes());
        NetworkId(hasher.finalize().into())
    }
}

/// The full pool partition for one epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pools(pub Vec<Pool>);

impl Pools {
    /// The pool containing `addr`, if the address was registered for the
    /// epoch.
    #[must_use]
    pub fn pool_with(&self, addr: &NodeAddress) -> Option<&Pool> {
        self.0.iter().find(|pool| pool.contains(addr))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(index: usize, addrs: &[&str]) -> Pool {
        Pool {
            index,
            addresses: addrs.iter().map(|a| NodeAddress::new(*a)).collect(),
        }
    }

    #[test]
    fn network_id_is_deterministic_per_epoch_and_index() {
        let epoch_a = EpochHash([1u8; 32]);
        let epoch_b = EpochHash([2u8; 32]);
        let p0 = pool(0, &["a", "b"]);
        let p1 = pool(1, &["c", "d"]);

        assert_eq!(p0.network_id(&epoch_a), p0.network_id(&epoch_a));
        assert_ne!(p0.network_id(&epoch_a), p1.network_id(&epoch_a));
        assert_ne!(p0.network_id(&epoch_a), p0.network_id(&epoch_b));
    }

    #[test]
    fn pool_with_finds_membership() {
        let pools = Pools(vec![pool(0, &["a", "b"]), pool(1, &["c"])]);
        assert_eq!(pools.pool_with(&NodeAddress::new("c")).unwrap().index, 1);
        assert!(pools.pool_with(&NodeAddress::new("z")).is_none());
    }
}
