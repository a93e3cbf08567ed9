//! Terminal-side chart resources.
//!
//! Implements the client's [`ChartRenderer`] seam. "Creating" a chart here
//! means registering its spec under a fresh handle; the draw pass reads the
//! registered spec for each logical slot. Handles are never reused, so a
//! stale handle can never resolve to a newer chart's data.

use std::collections::HashMap;

use auramon_client::{ChartHandle, ChartRenderer, ChartSpec, ChartTarget};

/// Registry of live chart specs keyed by handle.
#[derive(Debug, Default)]
pub struct TuiChartRenderer {
    next_id: u64,
    charts: HashMap<ChartHandle, (ChartTarget, ChartSpec)>,
}

impl TuiChartRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The spec currently registered for a logical chart slot.
    pub fn spec(&self, target: ChartTarget) -> Option<&ChartSpec> {
        self.charts
            .values()
            .find(|(t, _)| *t == target)
            .map(|(_, spec)| spec)
    }

    pub fn live_count(&self) -> usize {
        self.charts.len()
    }
}

impl ChartRenderer for TuiChartRenderer {
    fn create(&mut self, target: ChartTarget, spec: ChartSpec) -> ChartHandle {
        self.next_id += 1;
        let handle = ChartHandle(self.next_id);
        self.charts.insert(handle, (target, spec));
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if self.charts.remove(&handle).is_none() {
            tracing::warn!("destroy called with unknown chart handle {:?}", handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(title: &str) -> ChartSpec {
        ChartSpec {
            title: title.to_string(),
            labels: vec!["10:00:00".to_string()],
            points: vec![1.0],
        }
    }

    #[test]
    fn test_create_registers_spec() {
        let mut renderer = TuiChartRenderer::new();
        renderer.create(ChartTarget::Temperature, spec("temp"));

        assert_eq!(renderer.live_count(), 1);
        assert_eq!(renderer.spec(ChartTarget::Temperature).unwrap().title, "temp");
        assert!(renderer.spec(ChartTarget::Vibration).is_none());
    }

    #[test]
    fn test_destroy_unregisters() {
        let mut renderer = TuiChartRenderer::new();
        let handle = renderer.create(ChartTarget::Vibration, spec("vib"));
        renderer.destroy(handle);

        assert_eq!(renderer.live_count(), 0);
        assert!(renderer.spec(ChartTarget::Vibration).is_none());
    }

    #[test]
    fn test_handles_are_never_reused() {
        let mut renderer = TuiChartRenderer::new();
        let first = renderer.create(ChartTarget::Temperature, spec("a"));
        renderer.destroy(first);
        let second = renderer.create(ChartTarget::Temperature, spec("b"));

        assert_ne!(first, second);
        assert_eq!(renderer.spec(ChartTarget::Temperature).unwrap().title, "b");
    }
}
