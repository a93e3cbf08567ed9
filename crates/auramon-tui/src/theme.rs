//! Colors and icons for the dashboard.

use auramon_core::types::{AlertLevel, AlertSeverity, HealthBucket};
use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black;
pub const POPUP_BG: Color = Color::Rgb(28, 33, 43);

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent / text ---
pub const ACCENT: Color = Color::Cyan;
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green;
pub const STATUS_YELLOW: Color = Color::Yellow;
pub const STATUS_ORANGE: Color = Color::LightRed;
pub const STATUS_RED: Color = Color::Red;
pub const STATUS_BLUE: Color = Color::Blue;

/// Color for a machine's health bucket.
pub fn health_color(bucket: HealthBucket) -> Color {
    match bucket {
        HealthBucket::Good => STATUS_GREEN,
        HealthBucket::Fair => STATUS_YELLOW,
        HealthBucket::Degraded => STATUS_ORANGE,
        HealthBucket::Poor => STATUS_RED,
    }
}

/// Color for a fleet alert's severity.
pub fn severity_color(severity: AlertSeverity) -> Color {
    match severity {
        AlertSeverity::Info => STATUS_BLUE,
        AlertSeverity::Warning => STATUS_YELLOW,
        AlertSeverity::Critical => STATUS_ORANGE,
        AlertSeverity::Danger => STATUS_RED,
        AlertSeverity::Unknown => TEXT_MUTED,
    }
}

/// Color for a machine's alert level.
pub fn level_color(level: AlertLevel) -> Color {
    match level {
        AlertLevel::Healthy => STATUS_GREEN,
        AlertLevel::Warning => STATUS_YELLOW,
        AlertLevel::Critical => STATUS_ORANGE,
        AlertLevel::Danger => STATUS_RED,
        AlertLevel::Unknown => TEXT_MUTED,
    }
}

/// Icon for a machine type as reported by the backend.
pub fn machine_icon(machine_type: &str) -> &'static str {
    match machine_type {
        "Conveyor" => "⛓",
        "Press" => "🗜",
        "Motor" => "⚙",
        "Compressor" => "💨",
        "Pump" => "♻",
        _ => "▣",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_colors_ordered_by_severity() {
        assert_eq!(health_color(HealthBucket::Good), STATUS_GREEN);
        assert_eq!(health_color(HealthBucket::Poor), STATUS_RED);
    }

    #[test]
    fn test_unknown_machine_type_has_fallback_icon() {
        assert_eq!(machine_icon("Laser"), "▣");
        assert_ne!(machine_icon("Motor"), "▣");
    }

    #[test]
    fn test_unknown_severity_is_muted() {
        assert_eq!(severity_color(AlertSeverity::Unknown), TEXT_MUTED);
    }
}
