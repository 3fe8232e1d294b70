//! Order model for the darkpool.
//!
//! An order's identity is the SHA-256 content hash of all of its fields.
//! Equality follows identity: two orders built from the same fields are the
//! same order, and flipping any field (even only the nonce) yields a new one.
//!
//! Only the numeric magnitudes (price, min/max volume) are ever treated as
//! sensitive — parity, type, expiry, settlement, and token pair travel in
//! the clear inside fragments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::OrderId;

/// Which side of the book this order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Parity {
    Buy,
    Sell,
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// The type of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderType {
    /// Match at or better than the stated limit price.
    Limit,
    /// Match at the midpoint of the reference price; the limit acts as a bound.
    Midpoint,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Limit => write!(f, "limit"),
            Self::Midpoint => write!(f, "midpoint"),
        }
    }
}

/// How a confirmed match is settled. The core only carries this metadata;
/// settlement itself happens outside the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Settlement {
    /// Settled on the darkpool's native settlement layer.
    Native,
    /// Settled by an external atomic swap.
    Atomic,
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Atomic => write!(f, "atomic"),
        }
    }
}

/// A tradeable token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Token {
    Btc,
    Eth,
    Dgx,
    Ren,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Btc => write!(f, "BTC"),
            Self::Eth => write!(f, "ETH"),
            Self::Dgx => write!(f, "DGX"),
            Self::Ren => write!(f, "REN"),
        }
    }
}

/// An ordered token pair. The priority token is the one prices are quoted
/// in; the pair ordering is fixed so both sides of a match agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum TokenPair {
    BtcEth,
    BtcDgx,
    BtcRen,
    EthDgx,
    EthRen,
    DgxRen,
}

impl TokenPair {
    /// The token prices are quoted in.
    #[must_use]
    pub fn priority_token(self) -> Token {
        match self {
            Self::BtcEth => Token::Eth,
            Self::BtcDgx | Self::EthDgx => Token::Dgx,
            Self::BtcRen | Self::EthRen | Self::DgxRen => Token::Ren,
        }
    }

    /// The other token of the pair.
    #[must_use]
    pub fn non_priority_token(self) -> Token {
        match self {
            Self::BtcEth | Self::BtcDgx | Self::BtcRen => Token::Btc,
            Self::EthDgx | Self::EthRen => Token::Eth,
            Self::DgxRen => Token::Dgx,
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::BtcEth => 0,
            Self::BtcDgx => 1,
            Self::BtcRen => 2,
            Self::EthDgx => 3,
            Self::EthRen => 4,
            Self::DgxRen => 5,
        }
    }
}

impl std::fmt::Display for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.non_priority_token(), self.priority_token())
    }
}

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

/// A sensitive order. Value data: copied across boundaries, never shared
/// mutably.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub parity: Parity,
    pub order_type: OrderType,
    pub expiry: DateTime<Utc>,
    pub settlement: Settlement,
    pub tokens: TokenPair,
    /// Price in the smallest quotable unit of the priority token.
    pub price: u64,
    /// Smallest volume the owner will settle.
    pub min_volume: u64,
    /// Largest volume the owner will settle.
    pub max_volume: u64,
    /// Caller-chosen entropy; distinguishes otherwise identical orders.
    pub nonce: u64,
}

impl Order {
    /// Build an order, deriving its content-hash identity.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        parity: Parity,
        order_type: OrderType,
        expiry: DateTime<Utc>,
        settlement: Settlement,
        tokens: TokenPair,
        price: u64,
        max_volume: u64,
        min_volume: u64,
        nonce: u64,
    ) -> Self {
        let id = Self::content_hash(
            parity, order_type, expiry, settlement, tokens, price, max_volume, min_volume, nonce,
        );
        Self {
            id,
            parity,
            order_type,
            expiry,
            settlement,
            tokens,
            price,
            min_volume,
            max_volume,
            nonce,
        }
    }

    /// SHA-256 over every order field, versioned with a domain tag.
    /// Expiry is hashed at second precision, matching its on-chain form.
    #[allow(clippy::too_many_arguments)]
    fn content_hash(
        parity: Parity,
        order_type: OrderType,
        expiry: DateTime<Utc>,
        settlement: Settlement,
        tokens: TokenPair,
        price: u64,
        max_volume: u64,
        min_volume: u64,
        nonce: u64,
    ) -> OrderId {
        let mut hasher = Sha256::new();
        hasher.update(b"darkpool:order:v1:");
        hasher.update([parity as u8, order_type as u8, settlement as u8, tokens.code()]);
        hasher.update(expiry.timestamp().to_le_bytes());
        hasher.update(price.to_le_bytes());
        hasher.update(max_volume.to_le_bytes());
        hasher.update(min_volume.to_le_bytes());
        hasher.update(nonce.to_le_bytes());
        OrderId(hasher.finalize().into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn expiry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap()
    }

    fn order_with_nonce(nonce: u64) -> Order {
        Order::new(
            Parity::Buy,
            OrderType::Limit,
            expiry(),
            Settlement::Native,
            TokenPair::BtcEth,
            1_000_000_000_000,
            1_000_000_000_000,
            1_000_000_000_000,
            nonce,
        )
    }

    #[test]
    fn identical_fields_give_equal_orders() {
        let lhs = order_with_nonce(10);
        let rhs = order_with_nonce(10);
        assert_eq!(lhs.id, rhs.id);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn nonce_change_gives_a_new_identity() {
        let lhs = order_with_nonce(10);
        let rhs = order_with_nonce(20);
        assert_ne!(lhs.id, rhs.id);
        assert_ne!(lhs, rhs);
    }

    #[test]
    fn parity_change_gives_a_new_identity() {
        let buy = order_with_nonce(10);
        let sell = Order::new(
            Parity::Sell,
            buy.order_type,
            buy.expiry,
            buy.settlement,
            buy.tokens,
            buy.price,
            buy.max_volume,
            buy.min_volume,
            buy.nonce,
        );
        assert_ne!(buy.id, sell.id);
    }

    #[test]
    fn token_pair_priority() {
        assert_eq!(TokenPair::BtcEth.priority_token(), Token::Eth);
        assert_eq!(TokenPair::BtcEth.non_priority_token(), Token::Btc);
        assert_eq!(TokenPair::BtcDgx.priority_token(), Token::Dgx);
        assert_eq!(TokenPair::EthRen.priority_token(), Token::Ren);
        assert_eq!(TokenPair::DgxRen.non_priority_token(), Token::Dgx);
    }

    #[test]
    fn display_formats() {
        assert_eq!(format!("{}", Parity::Buy), "buy");
        assert_eq!(format!("{}", Parity::Sell), "sell");
        assert_eq!(format!("{}", TokenPair::BtcEth), "BTC-ETH");
        assert_eq!(format!("{}", TokenPair::DgxRen), "DGX-REN");
        assert_eq!(format!("{}", Settlement::Atomic), "atomic");
    }
}
