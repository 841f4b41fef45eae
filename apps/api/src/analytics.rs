//! Best-effort analytics: a bounded channel drained by one background worker.
//!
//! Request handlers never wait on the analytics sink. A full channel or a
//! failed write is logged and the event is dropped.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::models::analytics::AnalyticsEvent;
use crate::store::CareerStore;

#[derive(Clone)]
pub struct AnalyticsSender {
    tx: mpsc::Sender<AnalyticsEvent>,
}

impl AnalyticsSender {
    /// Hands the event to the worker without blocking.
    pub fn dispatch(&self, event: AnalyticsEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!("Analytics channel full; dropping {} event", event.event_type);
            }
            Err(TrySendError::Closed(event)) => {
                warn!(
                    "Analytics worker stopped; dropping {} event",
                    event.event_type
                );
            }
        }
    }
}

/// Starts the worker. It exits once every `AnalyticsSender` clone is dropped
/// and the queue is drained.
pub fn spawn_analytics_worker(
    store: Arc<dyn CareerStore>,
    capacity: usize,
) -> (AnalyticsSender, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<AnalyticsEvent>(capacity.max(1));

    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match store.record_event(&event).await {
                Ok(()) => debug!("Recorded analytics event {}", event.event_type),
                Err(e) => warn!("Failed to record analytics event {}: {e}", event.event_type),
            }
        }
        info!("Analytics worker drained and stopped");
    });

    (AnalyticsSender { tx }, handle)
}
