//! Order fragments: one share of an order's sensitive magnitudes.
//!
//! A fragment carries the order's identity and settlement metadata in the
//! clear; only price and volume magnitudes are secret-shared. Any `k` of
//! the `n` fragments produced by a split reconstruct the exact magnitudes,
//! fewer than `k` reveal nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{FragmentId, Order, OrderId, OrderType, Parity, Settlement, TokenPair};

/// One Shamir share: the polynomial evaluated at `index`.
///
/// `index` is never zero (zero holds the secret) and `value` is an element
/// of the computation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub index: u64,
    pub value: u64,
}

/// One of `n` fragments of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFragment {
    pub id: FragmentId,
    pub order_id: OrderId,
    pub order_parity: Parity,
    pub order_type: OrderType,
    pub order_expiry: DateTime<Utc>,
    pub order_settlement: Settlement,
    pub tokens: TokenPair,
    /// The share index common to every field share below.
    pub index: u64,
    pub price: Share,
    pub min_volume: Share,
    pub max_volume: Share,
}

impl OrderFragment {
    /// Assemble fragment `index` of `order` from its field shares.
    #[must_use]
    pub fn new(order: &Order, index: u64, price: Share, min_volume: Share, max_volume: Share) -> Self {
        Self {
            id: FragmentId::derive(&order.id, index),
            order_id: order.id,
            order_parity: order.parity,
            order_type: order.order_type,
            order_expiry: order.expiry,
            order_settlement: order.settlement,
            tokens: order.tokens,
            index,
            price,
            min_volume,
            max_volume,
        }
    }
}
