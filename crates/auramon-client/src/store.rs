//! Last-known-good fleet state.
//!
//! The snapshot store holds the most recent successfully committed fleet
//! payload. Commits replace everything at once; there is no per-field merge
//! and no partial update, so readers always see one coherent fleet.

use auramon_core::types::{AlertRecord, MachineId, MachineSnapshot, StatusResponse};
use chrono::{DateTime, Local};
use std::collections::HashMap;

/// Authoritative client-side copy of the fleet.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    machines: HashMap<MachineId, MachineSnapshot>,
    alerts: Vec<AlertRecord>,
    system_health: f64,
    total_machines: usize,
    active_alerts: usize,
    last_sync: Option<DateTime<Local>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire fleet state with a freshly fetched payload.
    ///
    /// Only called when both fleet legs of a cycle succeeded; a failed cycle
    /// never reaches this method, which is what keeps stale-but-coherent
    /// data on screen through backend outages.
    pub fn commit(&mut self, status: StatusResponse, alerts: Vec<AlertRecord>) {
        self.system_health = status.system_health;
        self.total_machines = status.total_machines.max(status.machines.len());
        self.active_alerts = status.active_alerts;
        self.machines = status.machines;
        self.alerts = alerts;
        self.last_sync = Some(Local::now());
    }

    pub fn machine(&self, machine_id: &str) -> Option<&MachineSnapshot> {
        self.machines.get(machine_id)
    }

    /// Machines in stable display order (sorted by id).
    pub fn machines_sorted(&self) -> Vec<&MachineSnapshot> {
        let mut machines: Vec<_> = self.machines.values().collect();
        machines.sort_by(|a, b| a.machine_id.cmp(&b.machine_id));
        machines
    }

    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    pub fn alerts(&self) -> &[AlertRecord] {
        &self.alerts
    }

    pub fn system_health(&self) -> f64 {
        self.system_health
    }

    pub fn total_machines(&self) -> usize {
        self.total_machines
    }

    pub fn active_alerts(&self) -> usize {
        self.active_alerts
    }

    /// When the last successful commit happened, if any.
    pub fn last_sync(&self) -> Option<DateTime<Local>> {
        self.last_sync
    }

    /// Whether at least one commit has landed.
    pub fn is_synced(&self) -> bool {
        self.last_sync.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auramon_core::types::{AlertLevel, AlertSeverity, MachineReadings};
    use chrono::NaiveDate;

    fn snapshot(id: &str, health: f64) -> MachineSnapshot {
        MachineSnapshot {
            machine_id: id.to_string(),
            name: format!("Machine {id}"),
            machine_type: "Pump".to_string(),
            location: "Line A".to_string(),
            current_readings: MachineReadings::default(),
            health_score: health,
            alert_level: AlertLevel::Healthy,
            failure_probability: 0.0,
            potential_issues: vec![],
            recommendation: String::new(),
            last_updated: NaiveDate::from_ymd_opt(2026, 8, 24)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            last_maintenance: None,
            next_maintenance: None,
        }
    }

    fn alert(machine_id: &str, message: &str) -> AlertRecord {
        AlertRecord {
            alert_id: String::new(),
            machine_id: machine_id.to_string(),
            alert_type: "threshold".to_string(),
            severity: AlertSeverity::Warning,
            message: message.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2026, 8, 24)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            acknowledged: false,
            resolved: false,
        }
    }

    fn status_with(machines: Vec<MachineSnapshot>) -> StatusResponse {
        let total = machines.len();
        StatusResponse {
            timestamp: None,
            machines: machines
                .into_iter()
                .map(|m| (m.machine_id.clone(), m))
                .collect(),
            system_health: 85.0,
            active_alerts: 1,
            total_machines: total,
        }
    }

    #[test]
    fn test_starts_unsynced() {
        let store = SnapshotStore::new();
        assert!(!store.is_synced());
        assert_eq!(store.machine_count(), 0);
        assert!(store.alerts().is_empty());
    }

    #[test]
    fn test_commit_replaces_everything() {
        let mut store = SnapshotStore::new();
        store.commit(
            status_with(vec![snapshot("m1", 90.0), snapshot("m2", 55.0)]),
            vec![alert("m2", "vibration high")],
        );

        assert!(store.is_synced());
        assert_eq!(store.machine_count(), 2);
        assert_eq!(store.system_health(), 85.0);
        assert_eq!(store.alerts().len(), 1);

        // A second commit with a different fleet removes machines that
        // disappeared from the payload.
        store.commit(status_with(vec![snapshot("m3", 70.0)]), vec![]);
        assert_eq!(store.machine_count(), 1);
        assert!(store.machine("m1").is_none());
        assert!(store.machine("m3").is_some());
        assert!(store.alerts().is_empty());
    }

    #[test]
    fn test_machines_sorted_is_stable() {
        let mut store = SnapshotStore::new();
        store.commit(
            status_with(vec![
                snapshot("press_02", 80.0),
                snapshot("conveyor_01", 90.0),
                snapshot("motor_03", 60.0),
            ]),
            vec![],
        );

        let ids: Vec<_> = store
            .machines_sorted()
            .iter()
            .map(|m| m.machine_id.as_str())
            .collect();
        assert_eq!(ids, vec!["conveyor_01", "motor_03", "press_02"]);
    }

    #[test]
    fn test_total_machines_falls_back_to_payload_len() {
        let mut store = SnapshotStore::new();
        let mut status = status_with(vec![snapshot("m1", 90.0)]);
        status.total_machines = 0;
        store.commit(status, vec![]);
        assert_eq!(store.total_machines(), 1);
    }
}
