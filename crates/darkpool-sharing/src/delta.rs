//! Delta fragments: share-wise comparison of a buy and a sell order.
//!
//! Each pool member holding fragment `i` of both candidate orders computes
//! the field differences of its shares locally; because Shamir sharing is
//! linear, joining `k` such difference-shares reconstructs the differences
//! of the original magnitudes without ever reconstructing the magnitudes
//! themselves. The joined [`Delta`] is then gated by [`Delta::is_match`].

use darkpool_types::{DarkpoolError, Delta, DeltaId, OrderFragment, OrderId, Parity, Result, Share};
use serde::{Deserialize, Serialize};

use crate::field::FieldElement;
use crate::shamir;

/// One member's local contribution to a delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaFragment {
    pub delta_id: DeltaId,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    /// The share index common to every difference share below.
    pub index: u64,
    /// Clear-text token agreement code: zero iff both orders trade the
    /// same pair.
    pub tokens: u64,
    /// Share of buy.price − sell.price.
    pub price: Share,
    /// Share of buy.max_volume − sell.min_volume.
    pub max_volume: Share,
    /// Share of sell.max_volume − buy.min_volume.
    pub min_volume: Share,
}

impl DeltaFragment {
    /// Compare one buy fragment against one sell fragment.
    ///
    /// Both fragments must carry the stated parity and the same share
    /// index; anything else is a caller error.
    pub fn new(buy: &OrderFragment, sell: &OrderFragment) -> Result<Self> {
        if buy.order_parity != Parity::Buy || sell.order_parity != Parity::Sell {
            return Err(DarkpoolError::FragmentMismatch {
                reason: format!(
                    "expected buy/sell parities, got {}/{}",
                    buy.order_parity, sell.order_parity
                ),
            });
        }
        if buy.index != sell.index {
            return Err(DarkpoolError::FragmentMismatch {
                reason: format!("share indices differ: {} vs {}", buy.index, sell.index),
            });
        }

        let diff = |a: Share, b: Share| Share {
            index: a.index,
            value: (FieldElement::new(a.value) - FieldElement::new(b.value)).value(),
        };

        Ok(Self {
            delta_id: DeltaId::derive(&buy.order_id, &sell.order_id),
            buy_order_id: buy.order_id,
            sell_order_id: sell.order_id,
            index: buy.index,
            tokens: u64::from(buy.tokens != sell.tokens),
            price: diff(buy.price, sell.price),
            max_volume: diff(buy.max_volume, sell.min_volume),
            min_volume: diff(sell.max_volume, buy.min_volume),
        })
    }
}

/// Join `k` or more delta fragments into the reconstructed [`Delta`].
pub fn join_delta_fragments(fragments: &[DeltaFragment]) -> Result<Delta> {
    let first = fragments.first().ok_or_else(|| DarkpoolError::FragmentMismatch {
        reason: "no delta fragments supplied".into(),
    })?;
    if let Some(stray) = fragments.iter().find(|f| f.delta_id != first.delta_id) {
        return Err(DarkpoolError::FragmentMismatch {
            reason: format!("delta fragments of {} mixed with {}", first.delta_id, stray.delta_id),
        });
    }

    let collect = |pick: fn(&DeltaFragment) -> Share| -> Vec<Share> {
        fragments.iter().map(pick).collect()
    };

    Ok(Delta {
        id: first.delta_id,
        buy_order_id: first.buy_order_id,
        sell_order_id: first.sell_order_id,
        tokens: u64::from(fragments.iter().any(|f| f.tokens != 0)),
        price: shamir::join(&collect(|f| f.price))?,
        max_volume: shamir::join(&collect(|f| f.max_volume))?,
        min_volume: shamir::join(&collect(|f| f.min_volume))?,
    })
}
