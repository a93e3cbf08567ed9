//! Declarative view model for the dashboard.
//!
//! [`DashboardView::project`] is a pure function from engine state to the
//! exact values the renderer draws. Rendering never reaches into the store
//! or the detail session directly, which keeps every display rule (row
//! caps, issue truncation, formatting) testable without a terminal.

use auramon_client::{DetailSession, SnapshotStore};
use auramon_core::types::{AlertLevel, AlertRecord, AlertSeverity, HealthBucket, MaintenanceLogEntry};

/// Alert rows shown in the fleet alerts panel.
pub const MAX_ALERT_ROWS: usize = 10;
/// Potential issues listed per machine card before collapsing to "+N more".
pub const MAX_ISSUES_PER_CARD: usize = 2;
/// Maintenance history rows shown in the detail view.
pub const MAX_MAINTENANCE_ROWS: usize = 5;

/// Top summary tiles.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTiles {
    pub total_machines: usize,
    pub healthy_machines: usize,
    pub system_health: f64,
    /// Simulated plant efficiency: system health plus a small per-frame
    /// jitter, clamped to 0..=100.
    pub efficiency: f64,
    pub active_alerts: usize,
}

/// One machine card in the fleet grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MachineCard {
    pub machine_id: String,
    pub name: String,
    pub machine_type: String,
    pub location: String,
    pub health_score: f64,
    pub bucket: HealthBucket,
    pub level: AlertLevel,
    pub temperature: f64,
    pub vibration: f64,
    pub rotation_speed: f64,
    pub load: f64,
    pub issues: Vec<String>,
    /// Issues beyond [`MAX_ISSUES_PER_CARD`], shown as "+N more".
    pub hidden_issues: usize,
}

/// One row in the alerts panel.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRow {
    pub severity: AlertSeverity,
    pub machine_id: String,
    pub message: String,
    pub time: String,
}

/// One row of maintenance history in the detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRow {
    pub when: String,
    pub activity: &'static str,
    pub description: String,
    pub technician: String,
}

/// The detail modal's content.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub machine_id: String,
    pub name: String,
    pub machine_type: String,
    pub location: String,
    /// True while the payload is still in flight.
    pub loading: bool,
    pub health_score: f64,
    pub bucket: HealthBucket,
    pub level: AlertLevel,
    pub failure_probability: f64,
    pub recommendation: String,
    pub temperature: f64,
    pub vibration: f64,
    pub rotation_speed: f64,
    pub load: f64,
    pub maintenance: Vec<MaintenanceRow>,
    pub recent_alerts: Vec<AlertRow>,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// False until the first successful commit; the renderer shows a
    /// connecting screen instead of an empty fleet.
    pub synced: bool,
    pub last_sync: Option<String>,
    pub summary: SummaryTiles,
    pub machines: Vec<MachineCard>,
    pub alerts: Vec<AlertRow>,
    pub detail: Option<DetailView>,
}

impl DashboardView {
    /// Project engine state into a frame's worth of display values.
    pub fn project(store: &SnapshotStore, session: &DetailSession, efficiency_jitter: f64) -> Self {
        let machines: Vec<MachineCard> = store
            .machines_sorted()
            .into_iter()
            .map(|m| {
                let mut issues = m.potential_issues.clone();
                let hidden_issues = issues.len().saturating_sub(MAX_ISSUES_PER_CARD);
                issues.truncate(MAX_ISSUES_PER_CARD);
                MachineCard {
                    machine_id: m.machine_id.clone(),
                    name: m.name.clone(),
                    machine_type: m.machine_type.clone(),
                    location: m.location.clone(),
                    health_score: m.health_score,
                    bucket: HealthBucket::from_score(m.health_score),
                    level: m.alert_level,
                    temperature: m.current_readings.temperature,
                    vibration: m.current_readings.vibration,
                    rotation_speed: m.current_readings.rotation_speed,
                    load: m.current_readings.load,
                    issues,
                    hidden_issues,
                }
            })
            .collect();

        let healthy_machines = machines
            .iter()
            .filter(|c| c.level == AlertLevel::Healthy)
            .count();

        let summary = SummaryTiles {
            total_machines: store.total_machines(),
            healthy_machines,
            system_health: store.system_health(),
            efficiency: (store.system_health() + efficiency_jitter).clamp(0.0, 100.0),
            active_alerts: store.active_alerts().max(store.alerts().len()),
        };

        let alerts = store
            .alerts()
            .iter()
            .take(MAX_ALERT_ROWS)
            .map(alert_row)
            .collect();

        Self {
            synced: store.is_synced(),
            last_sync: store.last_sync().map(|t| t.format("%H:%M:%S").to_string()),
            summary,
            machines,
            alerts,
            detail: detail_view(store, session),
        }
    }
}

fn alert_row(alert: &AlertRecord) -> AlertRow {
    AlertRow {
        severity: alert.severity,
        machine_id: alert.machine_id.clone(),
        message: alert.message.clone(),
        time: alert.timestamp.format("%H:%M:%S").to_string(),
    }
}

fn maintenance_row(entry: &MaintenanceLogEntry) -> MaintenanceRow {
    MaintenanceRow {
        when: entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
        activity: entry.activity_type.label(),
        description: entry.description.clone(),
        technician: entry.technician.clone(),
    }
}

fn detail_view(store: &SnapshotStore, session: &DetailSession) -> Option<DetailView> {
    let machine_id = session.selected()?;

    if let Some(detail) = session.detail() {
        let m = &detail.machine;
        return Some(DetailView {
            machine_id: m.machine_id.clone(),
            name: m.name.clone(),
            machine_type: m.machine_type.clone(),
            location: m.location.clone(),
            loading: false,
            health_score: m.health_score,
            bucket: HealthBucket::from_score(m.health_score),
            level: m.alert_level,
            failure_probability: m.failure_probability,
            recommendation: m.recommendation.clone(),
            temperature: m.current_readings.temperature,
            vibration: m.current_readings.vibration,
            rotation_speed: m.current_readings.rotation_speed,
            load: m.current_readings.load,
            maintenance: detail
                .maintenance_history
                .iter()
                .take(MAX_MAINTENANCE_ROWS)
                .map(maintenance_row)
                .collect(),
            recent_alerts: detail.recent_alerts.iter().map(alert_row).collect(),
        });
    }

    // Payload still in flight: show whatever the fleet snapshot knows.
    let snapshot = store.machine(machine_id);
    Some(DetailView {
        machine_id: machine_id.to_string(),
        name: snapshot
            .map(|m| m.name.clone())
            .unwrap_or_else(|| machine_id.to_string()),
        machine_type: snapshot.map(|m| m.machine_type.clone()).unwrap_or_default(),
        location: snapshot.map(|m| m.location.clone()).unwrap_or_default(),
        loading: true,
        health_score: snapshot.map(|m| m.health_score).unwrap_or_default(),
        bucket: HealthBucket::from_score(snapshot.map(|m| m.health_score).unwrap_or_default()),
        level: snapshot.map(|m| m.alert_level).unwrap_or(AlertLevel::Unknown),
        failure_probability: 0.0,
        recommendation: String::new(),
        temperature: 0.0,
        vibration: 0.0,
        rotation_speed: 0.0,
        load: 0.0,
        maintenance: vec![],
        recent_alerts: vec![],
    })
}

// ─────────────────────────────────────────────────────────────────
// UI interaction state
// ─────────────────────────────────────────────────────────────────

/// Which surface owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Dashboard,
    Detail,
    MaintenanceForm,
}

/// Field focus inside the maintenance form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Activity,
    Description,
    Technician,
}

/// In-progress maintenance form.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceForm {
    pub machine_id: String,
    pub activity_idx: usize,
    pub description: String,
    pub technician: String,
    pub field: FormField,
}

impl MaintenanceForm {
    pub fn new(machine_id: String) -> Self {
        Self {
            machine_id,
            activity_idx: 0,
            description: String::new(),
            technician: String::new(),
            field: FormField::Activity,
        }
    }

    pub fn activity(&self) -> auramon_core::types::MaintenanceActivity {
        auramon_core::types::MaintenanceActivity::SELECTABLE[self.activity_idx]
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            FormField::Activity => FormField::Description,
            FormField::Description => FormField::Technician,
            FormField::Technician => FormField::Activity,
        };
    }

    pub fn prev_field(&mut self) {
        self.field = match self.field {
            FormField::Activity => FormField::Technician,
            FormField::Description => FormField::Activity,
            FormField::Technician => FormField::Description,
        };
    }

    /// Cycle the activity selection by `delta` (wraps both ways).
    pub fn cycle_activity(&mut self, delta: isize) {
        let len = auramon_core::types::MaintenanceActivity::SELECTABLE.len() as isize;
        let idx = (self.activity_idx as isize + delta).rem_euclid(len);
        self.activity_idx = idx as usize;
    }

    /// The form can be submitted once a description exists.
    pub fn is_submittable(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// Keyboard-facing UI state owned by the run loop.
#[derive(Debug)]
pub struct UiState {
    pub mode: UiMode,
    /// Cursor into the sorted machine list.
    pub selected: usize,
    pub form: Option<MaintenanceForm>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            mode: UiMode::Dashboard,
            selected: 0,
            form: None,
        }
    }

    /// Move the fleet cursor, clamped to the current machine count.
    pub fn move_selection(&mut self, delta: isize, machine_count: usize) {
        if machine_count == 0 {
            self.selected = 0;
            return;
        }
        let max = machine_count - 1;
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, max as isize) as usize;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
