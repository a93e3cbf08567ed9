//! Focused-machine drill-down session.
//!
//! At most one machine is "open" at a time. The session owns the detail
//! payload and the two chart handles, and enforces the staleness guard: a
//! detail payload is only applied if its machine is still the selected one
//! when the payload arrives.

use auramon_core::prelude::*;
use auramon_core::types::{MachineDetail, MachineId};
use std::collections::HashMap;

use crate::charts::{history_chart_specs, ChartHandle, ChartRenderer, ChartTarget};

/// State of the currently focused machine, if any.
#[derive(Debug, Default)]
pub struct DetailSession {
    selected: Option<MachineId>,
    detail: Option<Box<MachineDetail>>,
    charts: HashMap<ChartTarget, ChartHandle>,
}

impl DetailSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `machine_id` as the focused machine.
    ///
    /// Switching to a different machine drops the previous payload so the
    /// view shows a loading state instead of the old machine's data. Chart
    /// handles are kept; they are replaced when the new payload applies.
    pub fn open(&mut self, machine_id: MachineId) {
        if self.selected.as_deref() != Some(machine_id.as_str()) {
            self.detail = None;
        }
        self.selected = Some(machine_id);
    }

    /// Close the session and destroy any live chart handles.
    ///
    /// Safe to call when nothing is open.
    pub fn close(&mut self, renderer: &mut dyn ChartRenderer) {
        for (_, handle) in self.charts.drain() {
            renderer.destroy(handle);
        }
        self.selected = None;
        self.detail = None;
    }

    /// Apply an arriving detail payload, unless it is stale.
    ///
    /// Returns `true` if the payload was applied. A payload is stale when
    /// its machine is no longer the selected one, which happens when the
    /// user closed the view or switched machines while the fetch was in
    /// flight.
    pub fn apply_detail(
        &mut self,
        renderer: &mut dyn ChartRenderer,
        machine_id: &str,
        detail: Box<MachineDetail>,
    ) -> bool {
        if self.selected.as_deref() != Some(machine_id) {
            debug!(
                "Discarding stale detail payload for {} (selected: {:?})",
                machine_id, self.selected
            );
            return false;
        }

        let (temperature, vibration) = history_chart_specs(&detail.historical_readings);
        self.detail = Some(detail);

        // Destroy-before-create, per target. Exactly one live handle per
        // chart slot at all times.
        for (target, spec) in [
            (ChartTarget::Temperature, temperature),
            (ChartTarget::Vibration, vibration),
        ] {
            if let Some(old) = self.charts.remove(&target) {
                renderer.destroy(old);
            }
            let handle = renderer.create(target, spec);
            self.charts.insert(target, handle);
        }
        true
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn detail(&self) -> Option<&MachineDetail> {
        self.detail.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    /// Whether a machine is selected but its payload has not arrived yet.
    pub fn is_loading(&self) -> bool {
        self.selected.is_some() && self.detail.is_none()
    }

    pub fn chart_handle(&self, target: ChartTarget) -> Option<ChartHandle> {
        self.charts.get(&target).copied()
    }

    pub fn live_chart_count(&self) -> usize {
        self.charts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_detail, FakeRenderer};

    #[test]
    fn test_open_sets_selection_and_loading() {
        let mut session = DetailSession::new();
        assert!(!session.is_open());

        session.open("m1".to_string());
        assert_eq!(session.selected(), Some("m1"));
        assert!(session.is_loading());
    }

    #[test]
    fn test_apply_detail_creates_both_charts() {
        let mut session = DetailSession::new();
        let mut renderer = FakeRenderer::new();

        session.open("m1".to_string());
        let applied = session.apply_detail(&mut renderer, "m1", Box::new(sample_detail("m1")));

        assert!(applied);
        assert!(!session.is_loading());
        assert_eq!(session.live_chart_count(), 2);
        assert_eq!(renderer.live_count(), 2);
        assert!(session.chart_handle(ChartTarget::Temperature).is_some());
        assert!(session.chart_handle(ChartTarget::Vibration).is_some());
    }

    #[test]
    fn test_reapply_destroys_old_handles_first() {
        let mut session = DetailSession::new();
        let mut renderer = FakeRenderer::new();

        session.open("m1".to_string());
        session.apply_detail(&mut renderer, "m1", Box::new(sample_detail("m1")));
        let first_temp = session.chart_handle(ChartTarget::Temperature).unwrap();

        session.apply_detail(&mut renderer, "m1", Box::new(sample_detail("m1")));
        let second_temp = session.chart_handle(ChartTarget::Temperature).unwrap();

        assert_ne!(first_temp, second_temp);
        assert_eq!(renderer.live_count(), 2);
        assert_eq!(renderer.created_count(), 4);
        assert_eq!(renderer.destroyed_count(), 2);
    }

    #[test]
    fn test_stale_payload_discarded() {
        let mut session = DetailSession::new();
        let mut renderer = FakeRenderer::new();

        session.open("m1".to_string());
        session.open("m2".to_string());

        // Payload for m1 arrives after the user switched to m2.
        let applied = session.apply_detail(&mut renderer, "m1", Box::new(sample_detail("m1")));
        assert!(!applied);
        assert!(session.detail().is_none());
        assert_eq!(renderer.created_count(), 0);
    }

    #[test]
    fn test_payload_after_close_discarded() {
        let mut session = DetailSession::new();
        let mut renderer = FakeRenderer::new();

        session.open("m1".to_string());
        session.close(&mut renderer);

        let applied = session.apply_detail(&mut renderer, "m1", Box::new(sample_detail("m1")));
        assert!(!applied);
        assert_eq!(renderer.live_count(), 0);
    }

    #[test]
    fn test_close_destroys_charts_and_is_idempotent() {
        let mut session = DetailSession::new();
        let mut renderer = FakeRenderer::new();

        session.open("m1".to_string());
        session.apply_detail(&mut renderer, "m1", Box::new(sample_detail("m1")));
        assert_eq!(renderer.live_count(), 2);

        session.close(&mut renderer);
        assert_eq!(renderer.live_count(), 0);
        assert!(!session.is_open());

        // Closing again must not double-destroy.
        session.close(&mut renderer);
        assert_eq!(renderer.destroyed_count(), 2);
    }

    #[test]
    fn test_switching_machines_drops_old_payload() {
        let mut session = DetailSession::new();
        let mut renderer = FakeRenderer::new();

        session.open("m1".to_string());
        session.apply_detail(&mut renderer, "m1", Box::new(sample_detail("m1")));
        assert!(session.detail().is_some());

        session.open("m2".to_string());
        assert!(session.is_loading());
        assert!(session.detail().is_none());
        // Handles survive until the new payload replaces them.
        assert_eq!(session.live_chart_count(), 2);
    }

    #[test]
    fn test_reopen_same_machine_keeps_payload() {
        let mut session = DetailSession::new();
        let mut renderer = FakeRenderer::new();

        session.open("m1".to_string());
        session.apply_detail(&mut renderer, "m1", Box::new(sample_detail("m1")));
        session.open("m1".to_string());
        assert!(session.detail().is_some());
    }
}
