//! Chart handle lifecycle and series preparation.
//!
//! Detail charts are external resources with explicit create/destroy calls.
//! The engine tracks exactly one handle per logical chart (temperature,
//! vibration) and always destroys the old handle before creating its
//! replacement, so renderer-side resources can never leak across detail
//! refreshes.

use auramon_core::types::ReadingPoint;

/// Most recent history points shown per chart.
pub const MAX_CHART_POINTS: usize = 24;

/// Logical chart slot within the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartTarget {
    Temperature,
    Vibration,
}

impl ChartTarget {
    pub fn label(&self) -> &'static str {
        match self {
            ChartTarget::Temperature => "Temperature (°C)",
            ChartTarget::Vibration => "Vibration (mm/s)",
        }
    }
}

/// Opaque identifier for a renderer-owned chart resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

/// Everything the renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub points: Vec<f64>,
}

/// Owner of chart resources.
///
/// Implementations keep whatever backing state they need; the engine only
/// holds [`ChartHandle`]s and guarantees destroy-before-create per target.
pub trait ChartRenderer: Send {
    fn create(&mut self, target: ChartTarget, spec: ChartSpec) -> ChartHandle;
    fn destroy(&mut self, handle: ChartHandle);
}

/// Build the temperature and vibration chart specs from a machine's
/// historical readings.
///
/// Keeps the most recent [`MAX_CHART_POINTS`] points and formats labels as
/// `%H:%M:%S`, matching the granularity of the simulated sensor feed.
pub fn history_chart_specs(readings: &[ReadingPoint]) -> (ChartSpec, ChartSpec) {
    let start = readings.len().saturating_sub(MAX_CHART_POINTS);
    let window = &readings[start..];

    let labels: Vec<String> = window
        .iter()
        .map(|p| p.timestamp.format("%H:%M:%S").to_string())
        .collect();

    let temperature = ChartSpec {
        title: ChartTarget::Temperature.label().to_string(),
        labels: labels.clone(),
        points: window.iter().map(|p| p.temperature).collect(),
    };
    let vibration = ChartSpec {
        title: ChartTarget::Vibration.label().to_string(),
        labels,
        points: window.iter().map(|p| p.vibration).collect(),
    };

    (temperature, vibration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(second: u32, temperature: f64, vibration: f64) -> ReadingPoint {
        ReadingPoint {
            timestamp: NaiveDate::from_ymd_opt(2026, 8, 24)
                .unwrap()
                .and_hms_opt(10, 0, second)
                .unwrap(),
            temperature,
            vibration,
            rotation_speed: 0.0,
            load: 0.0,
        }
    }

    #[test]
    fn test_specs_from_short_history() {
        let readings = vec![point(1, 70.0, 0.4), point(2, 71.0, 0.5)];
        let (temperature, vibration) = history_chart_specs(&readings);

        assert_eq!(temperature.points, vec![70.0, 71.0]);
        assert_eq!(vibration.points, vec![0.4, 0.5]);
        assert_eq!(temperature.labels, vec!["10:00:01", "10:00:02"]);
        assert_eq!(temperature.labels, vibration.labels);
    }

    #[test]
    fn test_specs_truncate_to_most_recent_points() {
        let readings: Vec<_> = (0..40)
            .map(|i| point(i, 60.0 + f64::from(i), 0.1))
            .collect();
        let (temperature, _) = history_chart_specs(&readings);

        assert_eq!(temperature.points.len(), MAX_CHART_POINTS);
        // Oldest surviving point is index 16 of the original series.
        assert_eq!(temperature.points[0], 76.0);
        assert_eq!(*temperature.points.last().unwrap(), 99.0);
        assert_eq!(temperature.labels[0], "10:00:16");
    }

    #[test]
    fn test_specs_from_empty_history() {
        let (temperature, vibration) = history_chart_specs(&[]);
        assert!(temperature.points.is_empty());
        assert!(vibration.points.is_empty());
        assert!(temperature.labels.is_empty());
    }
}
