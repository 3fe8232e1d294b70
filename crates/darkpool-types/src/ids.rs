//! Identifiers used throughout the darkpool node.
//!
//! Everything that crosses a component boundary is identified by either a
//! 32-byte content hash (orders, fragments, deltas, networks, epochs) or a
//! lexicographically ordered node address. Hash-derived identifiers use
//! SHA-256 with a domain-separation tag so two derivations can never collide.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// NetworkId
// ---------------------------------------------------------------------------

/// Identifier scoping one secure-computation network.
///
/// A node participates in multiple distinct computation networks in
/// parallel; messages tagged with different `NetworkId`s never cross-talk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NetworkId(pub [u8; 32]);

impl NetworkId {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "net:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// NodeAddress / MultiAddress
// ---------------------------------------------------------------------------

/// Identity of a node in the darkpool network.
///
/// The derived `Ord` (lexicographic on the underlying string) is the total
/// order every node agrees on without negotiation; it drives the
/// connect/listen tie-break during network formation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeAddress(pub String);

impl NodeAddress {
    #[must_use]
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved, routable peer location returned by the discovery layer.
///
/// Opaque to the core; only the transport interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiAddress(pub String);

impl MultiAddress {
    #[must_use]
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }
}

impl fmt::Display for MultiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// EpochHash
// ---------------------------------------------------------------------------

/// Chain-derived identity of one epoch, produced by the registry contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EpochHash(pub [u8; 32]);

impl EpochHash {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for EpochHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// Content-hash identity of an order.
///
/// Two orders with identical fields share an ID; changing any field — even
/// only the nonce — changes the ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderId(pub [u8; 32]);

impl OrderId {
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ord:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// FragmentId
// ---------------------------------------------------------------------------

/// Identity of one order fragment: SHA-256 over the parent order ID and
/// the fragment's share index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct FragmentId(pub [u8; 32]);

impl FragmentId {
    #[must_use]
    pub fn derive(order_id: &OrderId, index: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"darkpool:fragment:v1:");
        hasher.update(order_id.0);
        hasher.update(index.to_le_bytes());
        Self(hasher.finalize().into())
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frag:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// DeltaId
// ---------------------------------------------------------------------------

/// Identity of one computation-round result: SHA-256 over the candidate
/// buy/sell order pair. Deterministic, so every node in a pool derives the
/// same ID for the same comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct DeltaId(pub [u8; 32]);

impl DeltaId {
    #[must_use]
    pub fn derive(buy: &OrderId, sell: &OrderId) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"darkpool:delta:v1:");
        hasher.update(buy.0);
        hasher.update(sell.0);
        Self(hasher.finalize().into())
    }
}

impl fmt::Display for DeltaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "delta:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// Opaque unit of delivery on a computation network.
///
/// The core never interprets the payload; the wire format is owned by the
/// transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message(pub Vec<u8>);

impl Message {
    #[must_use]
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self(payload.into())
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

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_address_ordering_is_lexicographic() {
        let a = NodeAddress::new("alpha");
        let b = NodeAddress::new("bravo");
        assert!(a < b);
        assert!(NodeAddress::new("a") < NodeAddress::new("ab"));
    }

    #[test]
    fn fragment_id_is_deterministic() {
        let order = OrderId([7u8; 32]);
        assert_eq!(FragmentId::derive(&order, 3), FragmentId::derive(&order, 3));
        assert_ne!(FragmentId::derive(&order, 3), FragmentId::derive(&order, 4));
    }

    #[test]
    fn delta_id_depends_on_both_orders() {
        let buy = OrderId([1u8; 32]);
        let sell = OrderId([2u8; 32]);
        assert_eq!(DeltaId::derive(&buy, &sell), DeltaId::derive(&buy, &sell));
        assert_ne!(DeltaId::derive(&buy, &sell), DeltaId::derive(&sell, &buy));
    }

    #[test]
    fn network_id_display_is_short_hex() {
        let id = NetworkId([0xab; 32]);
        assert_eq!(format!("{id}"), "net:abababababababab");
    }
}
