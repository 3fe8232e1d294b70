//! Splitting orders into fragments and joining them back.
//!
//! Only the sensitive magnitudes (price, min volume, max volume) are
//! secret-shared; identity and settlement metadata travel in the clear.
//! Magnitudes are validated against the CoExp capacity bounds before any
//! share is produced, so a caller learns about an unencodable order
//! synchronously instead of poisoning a computation.

use darkpool_types::{DarkpoolError, Order, OrderFragment, OrderId, Result, Share};
use rand::Rng;
use tracing::debug;

use crate::coexp::CoExp;
use crate::shamir;

/// The exact magnitudes recovered from `k` fragments of one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconstructedOrder {
    pub order_id: OrderId,
    pub price: u64,
    pub min_volume: u64,
    pub max_volume: u64,
}

/// Split `order` into `n` fragments with reconstruction threshold `k`.
///
/// Each sensitive field is shared independently; fragment `i` carries the
/// `i`-th share of every field. Fragments are pairwise distinct and the
/// split is randomized: calling twice produces different fragments for the
/// same order.
pub fn split_order<R: Rng + ?Sized>(
    order: &Order,
    n: u64,
    k: u64,
    rng: &mut R,
) -> Result<Vec<OrderFragment>> {
    if k < 1 || k > n {
        return Err(DarkpoolError::InvalidThreshold { n, k });
    }

    // Capacity check first: magnitudes must fit the bounded encoding.
    CoExp::encode_price(order.price)?;
    CoExp::encode_volume(order.min_volume)?;
    CoExp::encode_volume(order.max_volume)?;

    let price = shamir::split(order.price, n, k, rng)?;
    let min_volume = shamir::split(order.min_volume, n, k, rng)?;
    let max_volume = shamir::split(order.max_volume, n, k, rng)?;

    debug!(order_id = %order.id, n, k, "split order into fragments");

    Ok(price
        .iter()
        .zip(&min_volume)
        .zip(&max_volume)
        .map(|((p, mn), mx)| OrderFragment::new(order, p.index, *p, *mn, *mx))
        .collect())
}

/// Join `k` or more fragments of one order back into its exact magnitudes.
///
/// All fragments must carry the same order identity; share indices must be
/// pairwise distinct.
pub fn join_fragments(fragments: &[OrderFragment]) -> Result<ReconstructedOrder> {
    let first = fragments.first().ok_or_else(|| DarkpoolError::FragmentMismatch {
        reason: "no fragments supplied".into(),
    })?;
    if let Some(stray) = fragments.iter().find(|f| f.order_id != first.order_id) {
        return Err(DarkpoolError::FragmentMismatch {
            reason: format!("fragments of {} mixed with {}", first.order_id, stray.order_id),
        });
    }

    let collect = |pick: fn(&OrderFragment) -> Share| -> Vec<Share> {
        fragments.iter().map(pick).collect()
    };

    Ok(ReconstructedOrder {
        order_id: first.order_id,
        price: shamir::join(&collect(|f| f.price))?,
        min_volume: shamir::join(&collect(|f| f.min_volume))?,
        max_volume: shamir::join(&collect(|f| f.max_volume))?,
    })
}
