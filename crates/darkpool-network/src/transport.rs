//! Transport and discovery capabilities consumed by the network manager.
//!
//! The core never touches sockets or encryption: it is handed a
//! [`Transport`] that can dial out or accept a peer on a named network,
//! and a [`Swarm`] that resolves a node identity to its current routable
//! location. Implementations own the wire format; [`Message`] payloads are
//! opaque here.

use std::future::Future;

use darkpool_types::{Message, MultiAddress, NetworkId, NodeAddress, Result};
use tokio_util::sync::CancellationToken;

/// A handle for delivering messages to one connected peer.
pub trait Sender: Clone + Send + Sync + 'static {
    fn send(&self, message: Message) -> impl Future<Output = Result<()>> + Send;
}

/// Callback invoked for every message arriving on a network.
///
/// One receiver instance is shared across all networks and peers; the
/// `from` address disambiguates.
pub trait Receiver: Send + Sync + 'static {
    fn receive(&self, from: NodeAddress, message: Message);
}

/// Establishes links on a named computation network.
///
/// `connect` dials a resolved peer location; `listen` accepts an inbound
/// link from a known peer. Both resolve to a [`Sender`] for the resulting
/// link and run until the supplied token is cancelled.
pub trait Transport: Send + Sync + 'static {
    type Sender: Sender;

    fn connect<R: Receiver>(
        &self,
        cancel: CancellationToken,
        network_id: NetworkId,
        to: MultiAddress,
        receiver: std::sync::Arc<R>,
    ) -> impl Future<Output = Result<Self::Sender>> + Send;

    fn listen<R: Receiver>(
        &self,
        cancel: CancellationToken,
        network_id: NetworkId,
        from: NodeAddress,
        receiver: std::sync::Arc<R>,
    ) -> impl Future<Output = Result<Self::Sender>> + Send;
}

/// Peer discovery: resolves a node identity to its current routable
/// location.
pub trait Swarm: Send + Sync + 'static {
    fn query_address(&self, peer: &NodeAddress) -> impl Future<Output = Result<MultiAddress>> + Send;
}
