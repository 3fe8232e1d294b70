//! Deterministic pool assignment.
//!
//! Every node that observes the same epoch and the same registered node
//! set must compute byte-identical pool assignments without coordination,
//! so assignment is a pure function of `(epoch_hash, node set, pool_size)`.
//! Nodes are ranked by the hash of their address salted with the epoch,
//! which reshuffles pools every epoch while staying verifiable by anyone.

use sha2::{Digest, Sha256};

use darkpool_types::{EpochHash, NodeAddress, Pool, Pools};

const POOL_RANK_TAG: &[u8] = b"darkpool:pool_rank:v1:";

fn rank(epoch_hash: &EpochHash, addr: &NodeAddress) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(POOL_RANK_TAG);
    hasher.update(epoch_hash.0);
    hasher.update(addr.0.as_bytes());
    hasher.finalize().into()
}

/// Partition the registered node set into pools for one epoch.
///
/// Input ordering and duplicates do not affect the result. Nodes are
/// sorted by their epoch-salted rank digest (address breaks the tie),
/// then cut into consecutive groups of `pool_size`; the final group keeps
/// the remainder and may be smaller.
#[must_use]
pub fn assign_pools(epoch_hash: &EpochHash, addrs: &[NodeAddress], pool_size: usize) -> Pools {
    let pool_size = pool_size.max(1);

    let mut ranked: Vec<([u8; 32], NodeAddress)> = addrs
        .iter()
        .map(|addr| (rank(epoch_hash, addr), addr.clone()))
        .collect();
    ranked.sort();
    ranked.dedup_by(|a, b| a.1 == b.1);

    let pools = ranked
        .chunks(pool_size)
        .enumerate()
        .map(|(index, chunk)| Pool {
            index,
            addresses: chunk.iter().map(|(_, addr)| addr.clone()).collect(),
        })
        .collect();
    Pools(pools)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addrs(names: &[&str]) -> Vec<NodeAddress> {
        names.iter().map(|name| NodeAddress::new(*name)).collect()
    }

    #[test]
    fn assignment_ignores_input_order_and_duplicates() {
        let epoch = EpochHash([7u8; 32]);
        let forward = addrs(&["a", "b", "c", "d", "e", "f", "g"]);
        let mut shuffled = addrs(&["g", "c", "a", "f", "b", "e", "d", "c", "a"]);
        shuffled.reverse();

        assert_eq!(
            assign_pools(&epoch, &forward, 3),
            assign_pools(&epoch, &shuffled, 3)
        );
    }

    #[test]
    fn remainder_forms_a_smaller_final_pool() {
        let epoch = EpochHash([7u8; 32]);
        let pools = assign_pools(&epoch, &addrs(&["a", "b", "c", "d", "e", "f", "g"]), 3);

        assert_eq!(pools.len(), 3);
        assert_eq!(pools.0[0].len(), 3);
        assert_eq!(pools.0[1].len(), 3);
        assert_eq!(pools.0[2].len(), 1);
        assert_eq!(pools.0[2].index, 2);
    }

    #[test]
    fn every_node_lands_in_exactly_one_pool() {
        let epoch = EpochHash([9u8; 32]);
        let nodes = addrs(&["a", "b", "c", "d", "e"]);
        let pools = assign_pools(&epoch, &nodes, 2);

        for node in &nodes {
            let count = pools.0.iter().filter(|pool| pool.contains(node)).count();
            assert_eq!(count, 1, "{node:?} appears {count} times");
        }
    }

    #[test]
    fn different_epochs_reshuffle_membership() {
        let nodes: Vec<NodeAddress> =
            (0..32).map(|i| NodeAddress::new(format!("node-{i:02}"))).collect();
        let pools_a = assign_pools(&EpochHash([1u8; 32]), &nodes, 8);
        let pools_b = assign_pools(&EpochHash([2u8; 32]), &nodes, 8);
        assert_ne!(pools_a, pools_b);
    }

    #[test]
    fn zero_pool_size_is_clamped() {
        let pools = assign_pools(&EpochHash([3u8; 32]), &addrs(&["a", "b"]), 0);
        assert_eq!(pools.len(), 2);
    }
}
