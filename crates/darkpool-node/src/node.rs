//! The epoch lifecycle supervisor.
//!
//! [`Node::run_epochs`] drives the whole life of a darkpool node: confirm
//! registration, watch the registry for epoch transitions, and for every
//! epoch this node is pooled into, connect the pool's computation network,
//! start the injected [`Computer`], and gate its deltas into match events.
//! Generations overlap through the [`GenerationRing`]: epoch `e+1` is
//! always started before epoch `e-1` is torn down.

use std::sync::Arc;

use darkpool_network::{Receiver, SmpcNetwork, Swarm, Transport};
use darkpool_sharing::FIELD_MODULUS;
use darkpool_types::{
    DarkpoolError, Delta, Epoch, MatchEvent, NodeAddress, NodeConfig, Pool, Result,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::compute::Computer;
use crate::generation::{Generation, GenerationRing};
use crate::pools::assign_pools;
use crate::registry::Registry;

/// A darkpool node core, wired from its injected collaborators.
pub struct Node<G, C, T, S, V>
where
    G: Registry,
    C: Computer,
    T: Transport,
    S: Swarm,
    V: Receiver,
{
    config: NodeConfig,
    registry: Arc<G>,
    network: Arc<SmpcNetwork<T, S, V>>,
    computer: Arc<C>,
    matches: mpsc::Sender<MatchEvent>,
}

impl<G, C, T, S, V> Node<G, C, T, S, V>
where
    G: Registry,
    C: Computer,
    T: Transport,
    S: Swarm,
    V: Receiver,
{
    /// Build a node and hand back the stream its match events arrive on.
    pub fn new(
        config: NodeConfig,
        registry: Arc<G>,
        network: Arc<SmpcNetwork<T, S, V>>,
        computer: Arc<C>,
    ) -> (Self, mpsc::Receiver<MatchEvent>) {
        let (matches, match_stream) = mpsc::channel(config.network.channel_capacity);
        let node = Self { config, registry, network, computer, matches };
        (node, match_stream)
    }

    /// Run the epoch lifecycle until `cancel` fires.
    ///
    /// Returns the error stream. A registration failure is fatal and
    /// surfaced once; everything after that point is forwarded as a
    /// non-fatal item and the lifecycle keeps running.
    pub fn run_epochs(self: &Arc<Self>, cancel: CancellationToken) -> mpsc::Receiver<DarkpoolError> {
        let (errors, error_stream) = mpsc::channel(self.config.network.channel_capacity);
        let node = Arc::clone(self);
        tokio::spawn(async move {
            node.epoch_loop(cancel, errors).await;
        });
        error_stream
    }

    async fn epoch_loop(&self, cancel: CancellationToken, errors: mpsc::Sender<DarkpoolError>) {
        info!(address = %self.config.address, "waiting for registration");
        let registered = tokio::select! {
            () = cancel.cancelled() => return,
            registered = self.registry.wait_until_registered(&self.config.address) => registered,
        };
        if let Err(err) = registered {
            error!(%err, "registration not confirmed, epoch processing aborted");
            let _ = errors.send(err).await;
            return;
        }
        info!(address = %self.config.address, "registration confirmed, watching epochs");

        let mut ring = GenerationRing::default();
        let mut epochs = self.registry.watch_epochs(cancel.child_token());
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                event = epochs.recv() => match event {
                    Some(Ok(epoch)) => {
                        self.start_generation(&cancel, epoch, &mut ring, &errors).await;
                    }
                    Some(Err(err)) => {
                        warn!(%err, "registry watch error");
                        let _ = errors.send(err).await;
                    }
                    None => {
                        warn!("epoch watch closed, re-establishing");
                        tokio::select! {
                            () = cancel.cancelled() => break,
                            () = tokio::time::sleep(self.config.epoch.node_list_backoff) => {}
                        }
                        epochs = self.registry.watch_epochs(cancel.child_token());
                    }
                }
            }
        }

        for generation in ring.retire_all() {
            self.retire(generation).await;
        }
        info!("epoch processing stopped");
    }

    /// Start the generation for one observed epoch, then retire whatever
    /// fell out of the ring.
    async fn start_generation(
        &self,
        cancel: &CancellationToken,
        epoch: Epoch,
        ring: &mut GenerationRing,
        errors: &mpsc::Sender<DarkpoolError>,
    ) {
        info!(epoch = %epoch.hash, "epoch observed");

        let nodes = match self.list_nodes().await {
            Ok(nodes) => nodes,
            Err(err) => {
                // Skip this epoch; the previous generation keeps running.
                warn!(epoch = %epoch.hash, %err, "cannot list nodes, skipping epoch");
                let _ = errors.send(err).await;
                return;
            }
        };

        let pools = assign_pools(&epoch.hash, &nodes, self.config.epoch.pool_size);
        let Some(pool) = pools.pool_with(&self.config.address) else {
            warn!(epoch = %epoch.hash, "not assigned to any pool this epoch");
            return;
        };
        let pool = pool.clone();
        let network_id = pool.network_id(&epoch.hash);
        info!(
            epoch = %epoch.hash,
            network = %network_id,
            pool = pool.index,
            members = pool.len(),
            "joining pool",
        );

        let generation = Generation {
            epoch_hash: epoch.hash,
            network_id,
            cancel: cancel.child_token(),
        };
        self.network.connect(network_id, pool.addresses.clone()).await;
        let deltas = self.computer.run(generation.cancel.clone(), network_id, pool.clone());
        self.pump_deltas(deltas, pool);

        // Only after the new generation is live does the two-epoch-old one
        // come down.
        if let Some(old) = ring.advance(generation) {
            self.retire(old).await;
        }
    }

    /// List the registered node set, retrying per the configured policy.
    async fn list_nodes(&self) -> Result<Vec<NodeAddress>> {
        let mut attempts = 0u32;
        loop {
            match self.registry.registered_nodes().await {
                Ok(nodes) => return Ok(nodes),
                Err(err) => {
                    attempts += 1;
                    if attempts > self.config.epoch.node_list_retries {
                        return Err(err);
                    }
                    warn!(%err, attempt = attempts, "node list unavailable, retrying");
                    tokio::time::sleep(self.config.epoch.node_list_backoff).await;
                }
            }
        }
    }

    /// Forward matching deltas from one computation run as match events.
    fn pump_deltas(&self, mut deltas: mpsc::Receiver<Delta>, pool: Pool) {
        let matches = self.matches.clone();
        tokio::spawn(async move {
            while let Some(delta) = deltas.recv().await {
                if !delta.is_match(FIELD_MODULUS) {
                    debug!(delta = %delta.id, "delta is not a match");
                    continue;
                }
                info!(
                    delta = %delta.id,
                    buy = %delta.buy_order_id,
                    sell = %delta.sell_order_id,
                    "match found",
                );
                let event = MatchEvent {
                    delta_id: delta.id,
                    buy_order_id: delta.buy_order_id,
                    sell_order_id: delta.sell_order_id,
                    pool: pool.addresses.clone(),
                };
                if matches.send(event).await.is_err() {
                    // The match stream consumer is gone.
                    return;
                }
            }
        });
    }

    async fn retire(&self, generation: Generation) {
        info!(epoch = %generation.epoch_hash, "retiring generation");
        generation.cancel.cancel();
        self.network.disconnect(generation.network_id).await;
    }
}
