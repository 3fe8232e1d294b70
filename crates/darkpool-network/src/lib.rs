//! Computation-network management for the darkpool node.
//!
//! Every epoch assigns this node to a pool, and every pool runs its secure
//! computation over a dedicated message-passing network. This crate keeps
//! those networks alive concurrently: [`SmpcNetwork`] tracks membership
//! per [`darkpool_types::NetworkId`], forms peer links deterministically
//! via the lexicographic tie-break, fans messages out, and tears a network
//! down in one cancellation when its epoch retires.
//!
//! The actual wire is abstracted behind the [`Transport`] trait; peer
//! discovery behind [`Swarm`]. Implementations plug in at the node layer.

pub mod network;
pub mod transport;

pub use network::{SmpcNetwork, quorum_threshold};
pub use transport::{Receiver, Sender, Swarm, Transport};
