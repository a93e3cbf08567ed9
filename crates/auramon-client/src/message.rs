//! Messages sent from background tasks to the sync engine.
//!
//! Every network result crosses the mpsc channel as one of these variants;
//! the engine applies them sequentially in `process_message`, which is what
//! makes commits atomic with respect to rendering.

use auramon_core::types::{AlertRecord, MachineDetail, MachineId, StatusResponse};

/// Events produced by background tasks and consumed by the engine loop.
#[derive(Debug)]
pub enum Message {
    /// The refresh ticker fired; the engine decides whether to start a cycle.
    RefreshTick,

    /// Both fleet legs of a refresh cycle succeeded.
    ///
    /// Boxed because `StatusResponse` carries the whole fleet and this enum
    /// travels through a channel.
    SnapshotLoaded {
        status: Box<StatusResponse>,
        alerts: Vec<AlertRecord>,
    },

    /// At least one fleet leg failed; last-known-good state stays untouched.
    RefreshFailed { error: String },

    /// A refresh cycle finished (success or failure). Clears the
    /// single-flight guard.
    CycleFinished,

    /// Detail payload arrived for `machine_id`.
    ///
    /// `user_initiated` distinguishes an explicit open from the per-cycle
    /// detail refresh; only the former surfaces errors to the user.
    DetailLoaded {
        machine_id: MachineId,
        detail: Box<MachineDetail>,
        user_initiated: bool,
    },

    /// Detail fetch failed for `machine_id`.
    DetailFailed {
        machine_id: MachineId,
        error: String,
        user_initiated: bool,
    },

    /// Maintenance record accepted by the backend.
    MaintenanceLogged { machine_id: MachineId },

    /// Maintenance submission failed.
    MaintenanceFailed { machine_id: MachineId, error: String },
}
