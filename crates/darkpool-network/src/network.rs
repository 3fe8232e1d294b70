//! The computation-network manager.
//!
//! [`SmpcNetwork`] owns the membership table for every named computation
//! network this node participates in: network id → peer → (sender, cancel
//! handle). The table is the only shared mutable structure in the crate
//! and is always accessed under its reader/writer lock; sends snapshot
//! sender handles under the read lock and deliver outside it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use darkpool_types::{DarkpoolError, Message, NetworkId, NodeAddress, Result};
use tokio::sync::RwLock;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::transport::{Receiver, Sender, Swarm, Transport};

/// Byzantine quorum threshold for a pool of `n + 1` members (the peers
/// plus this node): `2(n + 1) / 3`. Consumed by the secure-computation
/// layer; the network manager only derives and reports it.
#[must_use]
pub fn quorum_threshold(peers: usize) -> usize {
    2 * (peers + 1) / 3
}

struct PeerLink<S> {
    sender: S,
    cancel: CancellationToken,
}

struct NetworkEntry<S> {
    /// Cancelling this token releases every outstanding attempt and live
    /// link on the network.
    cancel: CancellationToken,
    peers: HashMap<NodeAddress, PeerLink<S>>,
}

/// Manager for message passing over multiple concurrent computation
/// networks.
pub struct SmpcNetwork<T: Transport, S: Swarm, R: Receiver> {
    own_address: NodeAddress,
    query_timeout: Duration,
    transport: Arc<T>,
    swarm: Arc<S>,
    receiver: Arc<R>,
    networks: Arc<RwLock<HashMap<NetworkId, NetworkEntry<T::Sender>>>>,
}

impl<T: Transport, S: Swarm, R: Receiver> SmpcNetwork<T, S, R> {
    #[must_use]
    pub fn new(
        own_address: NodeAddress,
        query_timeout: Duration,
        transport: Arc<T>,
        swarm: Arc<S>,
        receiver: Arc<R>,
    ) -> Self {
        Self {
            own_address,
            query_timeout,
            transport,
            swarm,
            receiver,
            networks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Connect to a new network of addresses.
    ///
    /// Registers the network and launches one connection attempt per peer.
    /// Returns once the network is accepting registrations — not once all
    /// peers are connected; partial connectivity is tolerated, and
    /// individual failures are logged rather than surfaced.
    ///
    /// For each peer the swarm is queried for a fresh multi-address (even
    /// for previously seen peers, to keep topology current), then the
    /// lexicographic tie-break decides the role: the smaller address
    /// initiates the link, the larger accepts it. Both sides thereby agree
    /// on a single link without negotiation.
    pub async fn connect(&self, network_id: NetworkId, addrs: Vec<NodeAddress>) {
        let quorum = quorum_threshold(addrs.len());
        info!(network = %network_id, peers = addrs.len(), quorum, "connecting to network");

        let root = CancellationToken::new();
        {
            let mut networks = self.networks.write().await;
            if let Some(stale) = networks.insert(
                network_id,
                NetworkEntry { cancel: root.clone(), peers: HashMap::new() },
            ) {
                stale.cancel.cancel();
            }
        }

        for addr in addrs {
            if addr == self.own_address {
                continue;
            }
            let attempt = root.child_token();
            let own_address = self.own_address.clone();
            let query_timeout = self.query_timeout;
            let transport = Arc::clone(&self.transport);
            let swarm = Arc::clone(&self.swarm);
            let receiver = Arc::clone(&self.receiver);
            let networks = Arc::clone(&self.networks);

            tokio::spawn(async move {
                debug!(network = %network_id, peer = %addr, "querying peer address");
                let multi_address = match timeout(query_timeout, swarm.query_address(&addr)).await {
                    Ok(Ok(multi_address)) => multi_address,
                    Ok(Err(err)) => {
                        warn!(network = %network_id, peer = %addr, %err, "address query failed");
                        return;
                    }
                    Err(_) => {
                        warn!(network = %network_id, peer = %addr, "address query timed out");
                        return;
                    }
                };

                if attempt.is_cancelled() {
                    return;
                }

                // The transport owns the attempt token from here: it must
                // abandon the dial or accept when the token fires.
                let initiate = own_address < addr;
                let link = if initiate {
                    debug!(network = %network_id, peer = %addr, "connecting to peer");
                    transport
                        .connect(attempt.clone(), network_id, multi_address, receiver)
                        .await
                } else {
                    debug!(network = %network_id, peer = %addr, "listening for peer");
                    transport
                        .listen(attempt.clone(), network_id, addr.clone(), receiver)
                        .await
                };

                let sender = match link {
                    Ok(sender) => sender,
                    Err(err) => {
                        warn!(network = %network_id, peer = %addr, %err, "cannot reach peer");
                        return;
                    }
                };

                let mut networks = networks.write().await;
                match networks.get_mut(&network_id) {
                    Some(entry) if !attempt.is_cancelled() => {
                        debug!(network = %network_id, peer = %addr, initiate, "peer connected");
                        entry.peers.insert(addr, PeerLink { sender, cancel: attempt });
                    }
                    // The network was disconnected (or replaced) while this
                    // attempt was in flight; release the fresh link.
                    _ => attempt.cancel(),
                }
            });
        }
    }

    /// Disconnect from an existing network.
    ///
    /// Cancels every outstanding attempt and live link atomically and
    /// removes all bookkeeping. Safe on unknown or partially formed
    /// networks; idempotent.
    pub async fn disconnect(&self, network_id: NetworkId) {
        info!(network = %network_id, "disconnecting from network");

        let mut networks = self.networks.write().await;
        if let Some(entry) = networks.remove(&network_id) {
            entry.cancel.cancel();
            for link in entry.peers.values() {
                link.cancel.cancel();
            }
        }
    }

    /// Send a message to every connected peer in a network.
    ///
    /// Delivery is best-effort: per-peer failures are logged and not
    /// retried here. Only an unknown network is reported to the caller.
    pub async fn send(&self, network_id: NetworkId, message: Message) -> Result<()> {
        let senders: Vec<(NodeAddress, T::Sender)> = {
            let networks = self.networks.read().await;
            let entry = networks
                .get(&network_id)
                .ok_or(DarkpoolError::UnknownNetwork(network_id))?;
            entry
                .peers
                .iter()
                .map(|(addr, link)| (addr.clone(), link.sender.clone()))
                .collect()
        };

        for (addr, sender) in senders {
            let message = message.clone();
            tokio::spawn(async move {
                if let Err(err) = sender.send(message).await {
                    warn!(network = %network_id, peer = %addr, %err, "send failed");
                }
            });
        }
        Ok(())
    }

    /// Send a message to one named peer on a network.
    ///
    /// Targeting an unknown network or an unconnected peer is a reported
    /// error; so is a failed delivery.
    pub async fn send_to(
        &self,
        network_id: NetworkId,
        to: NodeAddress,
        message: Message,
    ) -> Result<()> {
        let sender = {
            let networks = self.networks.read().await;
            let entry = networks
                .get(&network_id)
                .ok_or(DarkpoolError::UnknownNetwork(network_id))?;
            entry
                .peers
                .get(&to)
                .map(|link| link.sender.clone())
                .ok_or_else(|| DarkpoolError::UnknownPeer { network: network_id, peer: to.clone() })?
        };

        sender
            .send(message)
            .await
            .map_err(|err| DarkpoolError::SendFailed { peer: to, reason: err.to_string() })
    }

    /// The peers currently connected on a network. Empty for unknown
    /// networks.
    pub async fn peers(&self, network_id: NetworkId) -> Vec<NodeAddress> {
        let networks = self.networks.read().await;
        networks
            .get(&network_id)
            .map(|entry| entry.peers.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether the network is currently registered (connected or forming).
    pub async fn is_connected(&self, network_id: NetworkId) -> bool {
        self.networks.read().await.contains_key(&network_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quorum_threshold_is_two_thirds() {
        assert_eq!(quorum_threshold(0), 0);
        assert_eq!(quorum_threshold(2), 2);
        assert_eq!(quorum_threshold(23), 16);
        assert_eq!(quorum_threshold(30), 20);
    }
}
