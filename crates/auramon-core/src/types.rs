//! Domain types shared by the sync client and the TUI.
//!
//! Wire shapes mirror the Aura backend's JSON exactly (snake_case keys,
//! naive ISO-8601 timestamps, `"type"` for the machine kind). Every payload
//! is replaced wholesale on a successful fetch, so these types carry no
//! client-side bookkeeping fields.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Server-assigned machine identifier (e.g. `"conveyor_01"`).
pub type MachineId = String;

// ─────────────────────────────────────────────────────────────────
// Machines
// ─────────────────────────────────────────────────────────────────

/// Machine-level alert classification computed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Healthy,
    Warning,
    Critical,
    Danger,
    /// Fallback for values a newer backend may emit.
    #[serde(other)]
    Unknown,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Healthy => "healthy",
            AlertLevel::Warning => "warning",
            AlertLevel::Critical => "critical",
            AlertLevel::Danger => "danger",
            AlertLevel::Unknown => "unknown",
        }
    }
}

/// Latest sensor readings for one machine.
///
/// The backend sends an empty object until the first simulation cycle has
/// run, so every field defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineReadings {
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub vibration: f64,
    #[serde(default)]
    pub rotation_speed: f64,
    #[serde(default)]
    pub load: f64,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

/// The most recently committed, fully-fetched state of one machine.
///
/// Identity is [`MachineSnapshot::machine_id`]; snapshots are never merged
/// field-by-field, only replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub machine_id: MachineId,
    pub name: String,
    #[serde(rename = "type")]
    pub machine_type: String,
    pub location: String,
    #[serde(default)]
    pub current_readings: MachineReadings,
    pub health_score: f64,
    pub alert_level: AlertLevel,
    #[serde(default)]
    pub failure_probability: f64,
    #[serde(default)]
    pub potential_issues: Vec<String>,
    #[serde(default)]
    pub recommendation: String,
    pub last_updated: NaiveDateTime,
    #[serde(default)]
    pub last_maintenance: Option<NaiveDateTime>,
    #[serde(default)]
    pub next_maintenance: Option<NaiveDateTime>,
}

// ─────────────────────────────────────────────────────────────────
// Alerts
// ─────────────────────────────────────────────────────────────────

/// Severity of a fleet alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
    Danger,
    /// Fallback for values a newer backend may emit.
    #[serde(other)]
    Unknown,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
            AlertSeverity::Danger => "danger",
            AlertSeverity::Unknown => "unknown",
        }
    }
}

/// One fleet alert, ordered newest-first by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    #[serde(default)]
    pub alert_id: String,
    pub machine_id: MachineId,
    #[serde(default)]
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub resolved: bool,
}

// ─────────────────────────────────────────────────────────────────
// Maintenance
// ─────────────────────────────────────────────────────────────────

/// Kind of maintenance activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceActivity {
    Inspection,
    Repair,
    Replacement,
    Calibration,
    #[serde(other)]
    Unknown,
}

impl MaintenanceActivity {
    /// All activity kinds the scheduling form offers, in display order.
    pub const SELECTABLE: [MaintenanceActivity; 4] = [
        MaintenanceActivity::Inspection,
        MaintenanceActivity::Repair,
        MaintenanceActivity::Replacement,
        MaintenanceActivity::Calibration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceActivity::Inspection => "inspection",
            MaintenanceActivity::Repair => "repair",
            MaintenanceActivity::Replacement => "replacement",
            MaintenanceActivity::Calibration => "calibration",
            MaintenanceActivity::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceActivity::Inspection => "Inspection",
            MaintenanceActivity::Repair => "Repair",
            MaintenanceActivity::Replacement => "Component Replacement",
            MaintenanceActivity::Calibration => "Calibration",
            MaintenanceActivity::Unknown => "Unknown",
        }
    }
}

/// One past maintenance activity, read-only from the detail payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLogEntry {
    #[serde(default)]
    pub log_id: String,
    pub machine_id: MachineId,
    pub activity_type: MaintenanceActivity,
    pub description: String,
    #[serde(default)]
    pub technician: String,
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub parts_used: Vec<String>,
    #[serde(default)]
    pub cost: f64,
}

/// Body of `POST /maintenance`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceRequest {
    pub machine_id: MachineId,
    pub activity_type: MaintenanceActivity,
    pub description: String,
    pub technician: String,
}

// ─────────────────────────────────────────────────────────────────
// Wire envelopes
// ─────────────────────────────────────────────────────────────────

/// Response of `GET /status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    pub machines: HashMap<MachineId, MachineSnapshot>,
    pub system_health: f64,
    #[serde(default)]
    pub active_alerts: usize,
    #[serde(default)]
    pub total_machines: usize,
}

/// Response of `GET /alerts?limit=N`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertsResponse {
    pub alerts: Vec<AlertRecord>,
    #[serde(default)]
    pub total_count: usize,
}

/// One point of historical sensor data for the detail charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingPoint {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub vibration: f64,
    #[serde(default)]
    pub rotation_speed: f64,
    #[serde(default)]
    pub load: f64,
}

/// Response of `GET /machine/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineDetail {
    pub machine: MachineSnapshot,
    #[serde(default)]
    pub recent_alerts: Vec<AlertRecord>,
    #[serde(default)]
    pub maintenance_history: Vec<MaintenanceLogEntry>,
    #[serde(default)]
    pub historical_readings: Vec<ReadingPoint>,
}

/// Response of `GET /health` (service probe, used by `auramon --check`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// Health buckets
// ─────────────────────────────────────────────────────────────────

/// Four-tier classification of a 0-100 health score.
///
/// Inclusive lower bounds, open-ended above: ≥80 Good, ≥60 Fair,
/// ≥40 Degraded, else Poor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBucket {
    Good,
    Fair,
    Degraded,
    Poor,
}

impl HealthBucket {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            HealthBucket::Good
        } else if score >= 60.0 {
            HealthBucket::Fair
        } else if score >= 40.0 {
            HealthBucket::Degraded
        } else {
            HealthBucket::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthBucket::Good => "good",
            HealthBucket::Fair => "fair",
            HealthBucket::Degraded => "degraded",
            HealthBucket::Poor => "poor",
        }
    }
}
