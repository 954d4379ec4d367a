//! Snapshot relay
//!
//! Forwards every snapshot the sampler publishes to `readings` subscribers.

use std::sync::Arc;
use tokio::task::JoinHandle;

use super::hub::ConnectionHub;
use super::messages::WsEvent;
use crate::sampler::SnapshotFeed;

/// Start forwarding snapshots to the hub. The task ends when the sampler does.
pub fn spawn_relay(mut feed: SnapshotFeed, hub: Arc<ConnectionHub>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(snapshot) = feed.next().await {
            // Awaited so updates reach subscribers in tick order.
            let sent = hub.broadcast(&WsEvent::update(&snapshot)).await;
            tracing::trace!(sequence = snapshot.sequence, subscribers = sent, "Relayed snapshot");
        }

        tracing::debug!("Snapshot feed closed, relay stopped");
    })
}
