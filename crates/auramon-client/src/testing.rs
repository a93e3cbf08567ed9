//! Shared test fakes for the sync engine.

use auramon_core::prelude::*;
use auramon_core::types::{
    AlertLevel, AlertRecord, AlertSeverity, AlertsResponse, MachineDetail, MachineReadings,
    MachineSnapshot, MaintenanceRequest, ReadingPoint, ServiceHealth, StatusResponse,
};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::charts::{ChartHandle, ChartRenderer, ChartSpec, ChartTarget};
use crate::gateway::Gateway;

pub(crate) fn test_time(second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 24)
        .unwrap()
        .and_hms_opt(10, 0, second)
        .unwrap()
}

pub(crate) fn sample_machine(id: &str, health: f64) -> MachineSnapshot {
    MachineSnapshot {
        machine_id: id.to_string(),
        name: format!("Machine {id}"),
        machine_type: "Pump".to_string(),
        location: "Line A".to_string(),
        current_readings: MachineReadings {
            temperature: 71.0,
            vibration: 0.4,
            rotation_speed: 1480.0,
            load: 60.0,
            timestamp: Some(test_time(0)),
        },
        health_score: health,
        alert_level: AlertLevel::Healthy,
        failure_probability: 0.02,
        potential_issues: vec![],
        recommendation: "Continue normal operation".to_string(),
        last_updated: test_time(0),
        last_maintenance: None,
        next_maintenance: None,
    }
}

pub(crate) fn sample_alert(machine_id: &str, message: &str) -> AlertRecord {
    AlertRecord {
        alert_id: format!("a-{machine_id}"),
        machine_id: machine_id.to_string(),
        alert_type: "threshold".to_string(),
        severity: AlertSeverity::Warning,
        message: message.to_string(),
        timestamp: test_time(1),
        acknowledged: false,
        resolved: false,
    }
}

pub(crate) fn sample_status(machines: Vec<MachineSnapshot>) -> StatusResponse {
    let total = machines.len();
    StatusResponse {
        timestamp: Some(test_time(2)),
        machines: machines
            .into_iter()
            .map(|m| (m.machine_id.clone(), m))
            .collect(),
        system_health: 85.0,
        active_alerts: 0,
        total_machines: total,
    }
}

pub(crate) fn sample_detail(id: &str) -> MachineDetail {
    MachineDetail {
        machine: sample_machine(id, 85.0),
        recent_alerts: vec![sample_alert(id, "temperature spike")],
        maintenance_history: vec![],
        historical_readings: (0..6)
            .map(|i| ReadingPoint {
                timestamp: test_time(i),
                temperature: 70.0 + f64::from(i),
                vibration: 0.4,
                rotation_speed: 1480.0,
                load: 60.0,
            })
            .collect(),
    }
}

/// In-memory [`Gateway`] with canned responses and per-endpoint fail flags.
pub(crate) struct FakeGateway {
    status: Mutex<StatusResponse>,
    alerts: Mutex<Vec<AlertRecord>>,
    details: Mutex<HashMap<String, MachineDetail>>,
    pub(crate) fail_status: AtomicBool,
    pub(crate) fail_alerts: AtomicBool,
    pub(crate) fail_detail: AtomicBool,
    pub(crate) fail_maintenance: AtomicBool,
    submitted: Mutex<Vec<MaintenanceRequest>>,
}

impl FakeGateway {
    pub(crate) fn new(status: StatusResponse) -> Self {
        Self {
            status: Mutex::new(status),
            alerts: Mutex::new(vec![]),
            details: Mutex::new(HashMap::new()),
            fail_status: AtomicBool::new(false),
            fail_alerts: AtomicBool::new(false),
            fail_detail: AtomicBool::new(false),
            fail_maintenance: AtomicBool::new(false),
            submitted: Mutex::new(vec![]),
        }
    }

    pub(crate) fn set_status(&self, status: StatusResponse) {
        *self.status.lock().unwrap() = status;
    }

    pub(crate) fn set_alerts(&self, alerts: Vec<AlertRecord>) {
        *self.alerts.lock().unwrap() = alerts;
    }

    pub(crate) fn set_detail(&self, detail: MachineDetail) {
        self.details
            .lock()
            .unwrap()
            .insert(detail.machine.machine_id.clone(), detail);
    }

    pub(crate) fn submitted(&self) -> Vec<MaintenanceRequest> {
        self.submitted.lock().unwrap().clone()
    }
}

impl Gateway for FakeGateway {
    async fn fetch_status(&self) -> Result<StatusResponse> {
        if self.fail_status.load(Ordering::SeqCst) {
            return Err(Error::http_status(500, "/status"));
        }
        Ok(self.status.lock().unwrap().clone())
    }

    async fn fetch_alerts(&self, limit: usize) -> Result<AlertsResponse> {
        if self.fail_alerts.load(Ordering::SeqCst) {
            return Err(Error::http_status(500, "/alerts"));
        }
        let alerts = self.alerts.lock().unwrap().clone();
        let total_count = alerts.len();
        let alerts = alerts.into_iter().take(limit).collect();
        Ok(AlertsResponse {
            alerts,
            total_count,
        })
    }

    async fn fetch_machine(&self, machine_id: &str) -> Result<MachineDetail> {
        if self.fail_detail.load(Ordering::SeqCst) {
            return Err(Error::http_status(500, "/machine"));
        }
        self.details
            .lock()
            .unwrap()
            .get(machine_id)
            .cloned()
            .ok_or_else(|| Error::http_status(404, format!("/machine/{machine_id}")))
    }

    async fn submit_maintenance(&self, request: &MaintenanceRequest) -> Result<()> {
        if self.fail_maintenance.load(Ordering::SeqCst) {
            return Err(Error::http_status(500, "/maintenance"));
        }
        self.submitted.lock().unwrap().push(request.clone());
        Ok(())
    }

    async fn check_health(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth {
            status: "ok".to_string(),
            version: Some("test".to_string()),
        })
    }
}

/// [`ChartRenderer`] that tracks handle lifecycles.
///
/// Panics on destroying an unknown handle, which surfaces double-destroy
/// bugs directly in the failing test.
#[derive(Debug, Default)]
pub(crate) struct FakeRenderer {
    next_id: u64,
    live: HashMap<ChartHandle, ChartTarget>,
    created: usize,
    destroyed: usize,
}

impl FakeRenderer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.live.len()
    }

    pub(crate) fn created_count(&self) -> usize {
        self.created
    }

    pub(crate) fn destroyed_count(&self) -> usize {
        self.destroyed
    }
}

impl ChartRenderer for FakeRenderer {
    fn create(&mut self, target: ChartTarget, _spec: ChartSpec) -> ChartHandle {
        self.next_id += 1;
        let handle = ChartHandle(self.next_id);
        self.live.insert(handle, target);
        self.created += 1;
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if self.live.remove(&handle).is_none() {
            panic!("destroyed unknown or already-destroyed handle {handle:?}");
        }
        self.destroyed += 1;
    }
}
