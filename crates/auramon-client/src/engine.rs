//! The sync engine - single writer of all dashboard state.
//!
//! Background tasks report into the engine through [`Message`]s; the run
//! loop drains the channel and hands each message to
//! [`SyncEngine::process_message`] on one thread. Nothing else mutates the
//! snapshot store, the detail session, or the notification queue, so the
//! renderer always observes a coherent state between messages.

use std::sync::Arc;

use tokio::sync::mpsc;

use auramon_core::prelude::*;
use auramon_core::types::{MachineId, MaintenanceRequest};

use crate::actions::{spawn_detail_fetch, spawn_maintenance_submit, spawn_tick_cycle};
use crate::charts::ChartRenderer;
use crate::config::Settings;
use crate::detail::DetailSession;
use crate::gateway::Gateway;
use crate::message::Message;
use crate::notify::NotificationQueue;
use crate::store::SnapshotStore;

/// Owns dashboard state and coordinates refresh cycles.
pub struct SyncEngine<G> {
    gateway: Arc<G>,
    settings: Settings,
    store: SnapshotStore,
    detail: DetailSession,
    notifications: NotificationQueue,
    msg_tx: mpsc::Sender<Message>,
    /// Set once the initial load attempt finished (success or failure).
    ready: bool,
    /// Single-flight guard: at most one refresh cycle runs at a time.
    cycle_in_flight: bool,
}

impl<G> SyncEngine<G>
where
    G: Gateway + Send + Sync + 'static,
{
    pub fn new(gateway: Arc<G>, settings: Settings, msg_tx: mpsc::Sender<Message>) -> Self {
        Self {
            gateway,
            settings,
            store: SnapshotStore::new(),
            detail: DetailSession::new(),
            notifications: NotificationQueue::new(),
            msg_tx,
            ready: false,
            cycle_in_flight: false,
        }
    }

    /// Perform the initial fleet load, before the first render.
    ///
    /// Runs both fleet legs concurrently and commits all-or-nothing, same
    /// as a periodic cycle. A failed initial load leaves the store empty
    /// and queues an error notification; the periodic ticker will keep
    /// retrying, so the engine becomes ready either way.
    pub async fn initialize(&mut self) {
        let (status, alerts) = tokio::join!(
            self.gateway.fetch_status(),
            self.gateway.fetch_alerts(self.settings.alerts_limit)
        );

        match (status, alerts) {
            (Ok(status), Ok(alerts)) => {
                info!(
                    "Initial load complete: {} machines, {} alerts",
                    status.machines.len(),
                    alerts.alerts.len()
                );
                self.store.commit(status, alerts.alerts);
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Initial load failed: {}", e);
                self.notifications.error(format!(
                    "Failed to load dashboard: {e}. Retrying in background."
                ));
            }
        }
        self.ready = true;
    }

    /// Apply one message from a background task.
    ///
    /// This is the only mutation point in the engine. The renderer is
    /// passed in because applying a detail payload replaces chart handles.
    pub fn process_message(&mut self, msg: Message, renderer: &mut dyn ChartRenderer) {
        match msg {
            Message::RefreshTick => self.on_tick(),

            Message::SnapshotLoaded { status, alerts } => {
                debug!(
                    "Committing snapshot: {} machines, {} alerts",
                    status.machines.len(),
                    alerts.len()
                );
                self.store.commit(*status, alerts);
            }

            Message::RefreshFailed { error } => {
                // Keep showing last-known-good data; the next tick retries.
                warn!("Refresh cycle failed: {}", error);
            }

            Message::CycleFinished => {
                self.cycle_in_flight = false;
            }

            Message::DetailLoaded {
                machine_id,
                detail,
                user_initiated,
            } => {
                let applied = self.detail.apply_detail(renderer, &machine_id, detail);
                if !applied && user_initiated {
                    debug!("User-initiated detail for {} arrived stale", machine_id);
                }
            }

            Message::DetailFailed {
                machine_id,
                error,
                user_initiated,
            } => {
                if user_initiated {
                    self.notifications
                        .error(format!("Failed to load {machine_id}: {error}"));
                } else {
                    // Periodic detail refresh; the open view keeps its
                    // current payload.
                    debug!("Detail refresh failed for {}: {}", machine_id, error);
                }
            }

            Message::MaintenanceLogged { machine_id } => {
                info!("Maintenance logged for {}", machine_id);
                self.notifications
                    .info(format!("Maintenance recorded for {machine_id}"));
                // The maintenance history shown in the open detail view is
                // now outdated; refresh it.
                if self.detail.selected() == Some(machine_id.as_str()) {
                    spawn_detail_fetch(self.gateway.clone(), machine_id, self.msg_tx.clone());
                }
            }

            Message::MaintenanceFailed { machine_id, error } => {
                self.notifications
                    .error(format!("Maintenance submission failed for {machine_id}: {error}"));
            }
        }
    }

    /// Start a refresh cycle unless one is already running.
    fn on_tick(&mut self) {
        if !self.ready {
            debug!("Skipping tick: engine not ready");
            return;
        }
        if self.cycle_in_flight {
            debug!("Skipping tick: previous cycle still in flight");
            return;
        }
        self.cycle_in_flight = true;
        spawn_tick_cycle(
            self.gateway.clone(),
            self.settings.alerts_limit,
            self.detail.selected().map(String::from),
            self.msg_tx.clone(),
        );
    }

    /// Open the detail view for `machine_id` and fetch its payload.
    pub fn open_detail(&mut self, machine_id: MachineId) {
        self.detail.open(machine_id.clone());
        spawn_detail_fetch(self.gateway.clone(), machine_id, self.msg_tx.clone());
    }

    /// Close the detail view, destroying its chart handles.
    pub fn close_detail(&mut self, renderer: &mut dyn ChartRenderer) {
        self.detail.close(renderer);
    }

    /// Submit a maintenance record in the background.
    pub fn submit_maintenance(&self, request: MaintenanceRequest) {
        spawn_maintenance_submit(self.gateway.clone(), request, self.msg_tx.clone());
    }

    /// User-requested immediate refresh; still honors the single-flight
    /// guard.
    pub fn force_refresh(&mut self) {
        self.on_tick();
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn detail_session(&self) -> &DetailSession {
        &self.detail
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    pub fn prune_notifications(&mut self) {
        self.notifications.prune();
    }

    pub fn dismiss_notifications(&mut self) {
        self.notifications.dismiss_all();
    }

    pub fn ready(&self) -> bool {
        self.ready
    }
}
