//! Deltas: the output of one completed computation round.
//!
//! A delta carries the two candidate order identities and the reconstructed
//! field-element differences between them. [`Delta::is_match`] is the single
//! gate between "a delta was computed" and "a match event is worth
//! surfacing" — every delta passes through it before leaving the core.

use serde::{Deserialize, Serialize};

use crate::{DeltaId, NodeAddress, OrderId};

/// The reconstructed result of comparing one buy order against one sell
/// order. Each `u64` field is a field element: the difference is
/// non-negative iff the element is at most half the field modulus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub id: DeltaId,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    /// Zero iff both orders trade the same token pair.
    pub tokens: u64,
    /// buy.price − sell.price.
    pub price: u64,
    /// buy.max_volume − sell.min_volume.
    pub max_volume: u64,
    /// sell.max_volume − buy.min_volume.
    pub min_volume: u64,
}

impl Delta {
    /// Whether the two candidate orders match under `field_modulus`.
    ///
    /// True iff the token pairs agree and every reconstructed difference
    /// is non-negative in the field: the buyer pays at least the seller's
    /// price, and each side's maximum volume covers the other's minimum.
    #[must_use]
    pub fn is_match(&self, field_modulus: u64) -> bool {
        let half = field_modulus / 2;
        self.tokens == 0
            && self.price <= half
            && self.max_volume <= half
            && self.min_volume <= half
    }
}

/// An order match surfaced to the orchestration layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub delta_id: DeltaId,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    /// Addresses of the pool members that produced the delta.
    pub pool: Vec<NodeAddress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULUS: u64 = 17_012_364_981_921_935_471;

    fn delta(tokens: u64, price: u64, max_volume: u64, min_volume: u64) -> Delta {
        let buy = OrderId([1u8; 32]);
        let sell = OrderId([2u8; 32]);
        Delta {
            id: DeltaId::derive(&buy, &sell),
            buy_order_id: buy,
            sell_order_id: sell,
            tokens,
            price,
            max_volume,
            min_volume,
        }
    }

    #[test]
    fn non_negative_differences_match() {
        assert!(delta(0, 0, 0, 0).is_match(MODULUS));
        assert!(delta(0, 100, 1, MODULUS / 2).is_match(MODULUS));
    }

    #[test]
    fn negative_price_difference_does_not_match() {
        // −1 in the field wraps to modulus − 1, above the half threshold.
        assert!(!delta(0, MODULUS - 1, 0, 0).is_match(MODULUS));
    }

    #[test]
    fn token_disagreement_does_not_match() {
        assert!(!delta(1, 0, 0, 0).is_match(MODULUS));
    }

    #[test]
    fn negative_volume_differences_do_not_match() {
        assert!(!delta(0, 0, MODULUS - 5, 0).is_match(MODULUS));
        assert!(!delta(0, 0, 0, MODULUS - 5).is_match(MODULUS));
    }
}
