//! Background tasks for the sync engine.
//!
//! Every task here does network I/O and reports outcomes as [`Message`]s;
//! none of them touch engine state directly. Send failures on `msg_tx` mean
//! the engine is shutting down and are silently ignored.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use auramon_core::types::{MachineId, MaintenanceRequest};

use crate::config::REFRESH_INTERVAL_MIN_MS;
use crate::gateway::Gateway;
use crate::message::Message;

/// Spawn the periodic refresh ticker.
///
/// Emits [`Message::RefreshTick`] at `interval_ms` (clamped to
/// [`REFRESH_INTERVAL_MIN_MS`]) until the shutdown channel flips to `true`
/// or the message channel closes. Missed ticks are skipped rather than
/// bursting, so a stalled engine never faces a backlog of refreshes.
pub fn spawn_ticker(
    interval_ms: u64,
    msg_tx: mpsc::Sender<Message>,
    mut shutdown_rx: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    let interval_ms = interval_ms.max(REFRESH_INTERVAL_MIN_MS);

    tokio::spawn(async move {
        let mut tick = tokio::time::interval(Duration::from_millis(interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick fires immediately; the engine already did its
        // initial load, so swallow it.
        tick.tick().await;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if msg_tx.send(Message::RefreshTick).await.is_err() {
                        // Engine shutting down.
                        break;
                    }
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        tracing::debug!("Refresh ticker: shutdown signal received");
                        break;
                    }
                }
            }
        }
    })
}

/// Spawn one complete refresh cycle.
///
/// Leg 1 fetches `/status` and `/alerts` concurrently; the pair commits
/// all-or-nothing as [`Message::SnapshotLoaded`] or [`Message::RefreshFailed`].
/// Leg 2 runs only when a detail view is open and reports independently, so
/// a failed detail fetch never blocks the fleet commit (and vice versa).
/// [`Message::CycleFinished`] is always sent last to release the engine's
/// single-flight guard.
pub fn spawn_tick_cycle<G>(
    gateway: Arc<G>,
    alerts_limit: usize,
    open_detail: Option<MachineId>,
    msg_tx: mpsc::Sender<Message>,
) where
    G: Gateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let (status, alerts) = tokio::join!(
            gateway.fetch_status(),
            gateway.fetch_alerts(alerts_limit)
        );

        match (status, alerts) {
            (Ok(status), Ok(alerts)) => {
                let _ = msg_tx
                    .send(Message::SnapshotLoaded {
                        status: Box::new(status),
                        alerts: alerts.alerts,
                    })
                    .await;
            }
            (Err(e), _) | (_, Err(e)) => {
                let _ = msg_tx
                    .send(Message::RefreshFailed {
                        error: e.to_string(),
                    })
                    .await;
            }
        }

        if let Some(machine_id) = open_detail {
            match gateway.fetch_machine(&machine_id).await {
                Ok(detail) => {
                    let _ = msg_tx
                        .send(Message::DetailLoaded {
                            machine_id,
                            detail: Box::new(detail),
                            user_initiated: false,
                        })
                        .await;
                }
                Err(e) => {
                    let _ = msg_tx
                        .send(Message::DetailFailed {
                            machine_id,
                            error: e.to_string(),
                            user_initiated: false,
                        })
                        .await;
                }
            }
        }

        let _ = msg_tx.send(Message::CycleFinished).await;
    });
}

/// Spawn a one-shot detail fetch for a machine the user just opened.
pub fn spawn_detail_fetch<G>(gateway: Arc<G>, machine_id: MachineId, msg_tx: mpsc::Sender<Message>)
where
    G: Gateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        match gateway.fetch_machine(&machine_id).await {
            Ok(detail) => {
                let _ = msg_tx
                    .send(Message::DetailLoaded {
                        machine_id,
                        detail: Box::new(detail),
                        user_initiated: true,
                    })
                    .await;
            }
            Err(e) => {
                tracing::warn!("Detail fetch failed for {}: {}", machine_id, e);
                let _ = msg_tx
                    .send(Message::DetailFailed {
                        machine_id,
                        error: e.to_string(),
                        user_initiated: true,
                    })
                    .await;
            }
        }
    });
}

/// Spawn a one-shot maintenance submission.
pub fn spawn_maintenance_submit<G>(
    gateway: Arc<G>,
    request: MaintenanceRequest,
    msg_tx: mpsc::Sender<Message>,
) where
    G: Gateway + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let machine_id = request.machine_id.clone();
        match gateway.submit_maintenance(&request).await {
            Ok(()) => {
                let _ = msg_tx.send(Message::MaintenanceLogged { machine_id }).await;
            }
            Err(e) => {
                tracing::warn!("Maintenance submission failed for {}: {}", machine_id, e);
                let _ = msg_tx
                    .send(Message::MaintenanceFailed {
                        machine_id,
                        error: e.to_string(),
                    })
                    .await;
            }
        }
    });
}
