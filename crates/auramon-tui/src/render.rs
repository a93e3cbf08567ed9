//! Frame rendering for the dashboard.
//!
//! Pure view layer: everything drawn here comes from the projected
//! [`DashboardView`], the [`UiState`], and the chart registry. No engine
//! state is read directly.

use auramon_client::{ChartTarget, Notification, NotificationQueue, NotifyLevel};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Chart, Clear, Dataset, Gauge, GraphType, Paragraph,
};
use ratatui::Frame;

use crate::charts::TuiChartRenderer;
use crate::theme;
use crate::view_model::{
    AlertRow, DashboardView, DetailView, FormField, MaintenanceForm, UiState,
};

/// Render one complete frame.
pub fn draw(
    frame: &mut Frame,
    view: &DashboardView,
    ui: &UiState,
    charts: &TuiChartRenderer,
    notifications: &NotificationQueue,
) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::DEEPEST_BG)),
        area,
    );

    if !view.synced && view.machines.is_empty() {
        draw_connecting(frame, area, notifications);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(4), // summary tiles
            Constraint::Min(8),    // fleet + alerts
            Constraint::Length(1), // status line
        ])
        .split(area);

    draw_header(frame, rows[0], view);
    draw_summary(frame, rows[1], view);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[2]);
    draw_fleet(frame, columns[0], view, ui);
    draw_alerts(frame, columns[1], view);

    draw_status_line(frame, rows[3], view, notifications);

    if let Some(detail) = &view.detail {
        draw_detail_modal(frame, area, detail, charts);
    }
    if let Some(form) = &ui.form {
        draw_maintenance_form(frame, area, form);
    }
}

fn draw_connecting(frame: &mut Frame, area: Rect, notifications: &NotificationQueue) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(5),
            Constraint::Percentage(40),
        ])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            "Aura Monitor",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Connecting to monitoring service...",
            Style::default().fg(theme::TEXT_SECONDARY),
        )),
    ];
    if let Some(latest) = notifications.latest() {
        lines.push(Line::from(Span::styled(
            latest.message.clone(),
            Style::default().fg(notify_color(latest)),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        vertical[1],
    );
}

fn draw_header(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let sync = match &view.last_sync {
        Some(time) => format!("last sync {time}"),
        None => "never synced".to_string(),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " AURA ",
            Style::default()
                .fg(theme::DEEPEST_BG)
                .bg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " Industrial Machine Monitoring",
            Style::default().fg(theme::TEXT_PRIMARY),
        ),
        Span::styled(format!("  ·  {sync}"), Style::default().fg(theme::TEXT_MUTED)),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme::BORDER_DIM)),
    );
    frame.render_widget(header, area);
}

fn draw_summary(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let summary = &view.summary;
    draw_tile(
        frame,
        tiles[0],
        "Machines",
        format!("{}/{}", summary.healthy_machines, summary.total_machines),
        theme::ACCENT,
        "healthy / total",
    );
    draw_tile(
        frame,
        tiles[1],
        "System Health",
        format!("{:.1}%", summary.system_health),
        theme::health_color(auramon_core::types::HealthBucket::from_score(
            summary.system_health,
        )),
        "fleet average",
    );
    draw_tile(
        frame,
        tiles[2],
        "Efficiency",
        format!("{:.1}%", summary.efficiency),
        theme::STATUS_BLUE,
        "estimated output",
    );
    let alerts_color = if summary.active_alerts == 0 {
        theme::STATUS_GREEN
    } else {
        theme::STATUS_RED
    };
    draw_tile(
        frame,
        tiles[3],
        "Active Alerts",
        summary.active_alerts.to_string(),
        alerts_color,
        "unresolved",
    );
}

fn draw_tile(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    value_color: ratatui::style::Color,
    caption: &str,
) {
    let tile = Paragraph::new(vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(value_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(caption, Style::default().fg(theme::TEXT_MUTED))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::bordered()
            .title(title)
            .border_style(Style::default().fg(theme::BORDER_DIM)),
    );
    frame.render_widget(tile, area);
}

fn draw_fleet(frame: &mut Frame, area: Rect, view: &DashboardView, ui: &UiState) {
    let block = Block::bordered()
        .title("Fleet")
        .border_style(Style::default().fg(theme::BORDER_DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.machines.is_empty() {
        frame.render_widget(
            Paragraph::new("No machines reported")
                .style(Style::default().fg(theme::TEXT_MUTED))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    // One card of fixed height per machine, top to bottom, clipped to the
    // visible area.
    const CARD_HEIGHT: u16 = 4;
    let visible = (inner.height / CARD_HEIGHT) as usize;
    // Keep the cursor on screen by scrolling whole cards.
    let first = ui.selected.saturating_sub(visible.saturating_sub(1));
    for (row, (idx, card)) in view
        .machines
        .iter()
        .enumerate()
        .skip(first)
        .take(visible.max(1))
        .enumerate()
    {
        let card_area = Rect::new(
            inner.x,
            inner.y + (row as u16) * CARD_HEIGHT,
            inner.width,
            CARD_HEIGHT.min(inner.height.saturating_sub((row as u16) * CARD_HEIGHT)),
        );
        if card_area.height == 0 {
            break;
        }
        draw_machine_card(frame, card_area, card, idx == ui.selected);
    }
}

fn draw_machine_card(
    frame: &mut Frame,
    area: Rect,
    card: &crate::view_model::MachineCard,
    selected: bool,
) {
    let border_color = if selected {
        theme::BORDER_ACTIVE
    } else {
        theme::BORDER_DIM
    };
    let block = Block::bordered()
        .title(Line::from(vec![
            Span::raw(format!("{} ", theme::machine_icon(&card.machine_type))),
            Span::styled(
                card.name.clone(),
                Style::default().fg(theme::TEXT_PRIMARY),
            ),
            Span::styled(
                format!(" · {}", card.location),
                Style::default().fg(theme::TEXT_MUTED),
            ),
        ]))
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    // Row 1: health gauge.
    let gauge = Gauge::default()
        .ratio((card.health_score / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.0}% {}", card.health_score, card.bucket.label()))
        .gauge_style(Style::default().fg(theme::health_color(card.bucket)));
    frame.render_widget(gauge, rows[0]);

    // Row 2: readings plus collapsed issue list.
    if rows.len() > 1 && rows[1].height > 0 {
        let mut spans = vec![
            Span::styled(
                format!("{:.1}°C ", card.temperature),
                Style::default().fg(theme::TEXT_SECONDARY),
            ),
            Span::styled(
                format!("{:.2}mm/s ", card.vibration),
                Style::default().fg(theme::TEXT_SECONDARY),
            ),
            Span::styled(
                format!("{:.0}rpm ", card.rotation_speed),
                Style::default().fg(theme::TEXT_SECONDARY),
            ),
            Span::styled(
                format!("{:.0}% load", card.load),
                Style::default().fg(theme::TEXT_SECONDARY),
            ),
        ];
        if !card.issues.is_empty() {
            spans.push(Span::styled(
                format!("  ⚠ {}", card.issues.join(", ")),
                Style::default().fg(theme::level_color(card.level)),
            ));
            if card.hidden_issues > 0 {
                spans.push(Span::styled(
                    format!(" +{} more", card.hidden_issues),
                    Style::default().fg(theme::TEXT_MUTED),
                ));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
    }
}

fn draw_alerts(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let block = Block::bordered()
        .title("Alerts")
        .border_style(Style::default().fg(theme::BORDER_DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.alerts.is_empty() {
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "✓ No Active Alerts",
                    Style::default().fg(theme::STATUS_GREEN),
                )),
                Line::from(Span::styled(
                    "All systems operating normally",
                    Style::default().fg(theme::TEXT_MUTED),
                )),
            ])
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let lines: Vec<Line> = view.alerts.iter().map(alert_line).collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn alert_line(row: &AlertRow) -> Line<'_> {
    Line::from(vec![
        Span::styled(
            format!("{} ", row.time),
            Style::default().fg(theme::TEXT_MUTED),
        ),
        Span::styled(
            format!("[{}] ", row.machine_id),
            Style::default().fg(theme::TEXT_SECONDARY),
        ),
        Span::styled(
            row.message.clone(),
            Style::default().fg(theme::severity_color(row.severity)),
        ),
    ])
}

fn notify_color(notification: &Notification) -> ratatui::style::Color {
    match notification.level {
        NotifyLevel::Info => theme::STATUS_GREEN,
        NotifyLevel::Warning => theme::STATUS_YELLOW,
        NotifyLevel::Error => theme::STATUS_RED,
    }
}

fn draw_status_line(
    frame: &mut Frame,
    area: Rect,
    view: &DashboardView,
    notifications: &NotificationQueue,
) {
    let line = if let Some(latest) = notifications.latest() {
        Line::from(Span::styled(
            format!(" {}", latest.message),
            Style::default().fg(notify_color(latest)),
        ))
    } else {
        let hints = if view.detail.is_some() {
            " Esc close · m maintenance · a acknowledge · r refresh"
        } else {
            " q quit · ↑↓ select · Enter details · r refresh"
        };
        Line::from(Span::styled(hints, Style::default().fg(theme::TEXT_MUTED)))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

fn draw_detail_modal(frame: &mut Frame, area: Rect, detail: &DetailView, charts: &TuiChartRenderer) {
    let modal = centered_rect(area, 84, 84);
    frame.render_widget(Clear, modal);

    let block = Block::bordered()
        .title(Line::from(vec![
            Span::raw(format!("{} ", theme::machine_icon(&detail.machine_type))),
            Span::styled(
                detail.name.clone(),
                Style::default()
                    .fg(theme::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" · {}", detail.location),
                Style::default().fg(theme::TEXT_MUTED),
            ),
        ]))
        .border_style(Style::default().fg(theme::BORDER_ACTIVE))
        .style(Style::default().bg(theme::DEEPEST_BG));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    if detail.loading {
        frame.render_widget(
            Paragraph::new("Loading machine data...")
                .style(Style::default().fg(theme::TEXT_SECONDARY))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // vitals
            Constraint::Min(6),    // charts
            Constraint::Length(1 + crate::view_model::MAX_MAINTENANCE_ROWS as u16),
        ])
        .split(inner);

    let vitals = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Health ", Style::default().fg(theme::TEXT_MUTED)),
            Span::styled(
                format!("{:.1}% ({})", detail.health_score, detail.bucket.label()),
                Style::default().fg(theme::health_color(detail.bucket)),
            ),
            Span::styled("   Failure risk ", Style::default().fg(theme::TEXT_MUTED)),
            Span::styled(
                format!("{:.0}%", detail.failure_probability * 100.0),
                Style::default().fg(theme::level_color(detail.level)),
            ),
            Span::styled(
                format!(
                    "   {:.1}°C · {:.2}mm/s · {:.0}rpm · {:.0}% load",
                    detail.temperature, detail.vibration, detail.rotation_speed, detail.load
                ),
                Style::default().fg(theme::TEXT_SECONDARY),
            ),
        ]),
        Line::from(Span::styled(
            detail.recommendation.clone(),
            Style::default().fg(theme::TEXT_SECONDARY),
        )),
    ]);
    frame.render_widget(vitals, rows[0]);

    let chart_columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    draw_history_chart(frame, chart_columns[0], charts, ChartTarget::Temperature);
    draw_history_chart(frame, chart_columns[1], charts, ChartTarget::Vibration);

    draw_maintenance_history(frame, rows[2], detail);
}

fn draw_history_chart(
    frame: &mut Frame,
    area: Rect,
    charts: &TuiChartRenderer,
    target: ChartTarget,
) {
    let block = Block::bordered()
        .title(target.label())
        .border_style(Style::default().fg(theme::BORDER_DIM));

    let Some(spec) = charts.spec(target) else {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new("no history")
                .style(Style::default().fg(theme::TEXT_MUTED))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let points: Vec<(f64, f64)> = spec
        .points
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();

    let (y_min, y_max) = spec
        .points
        .iter()
        .fold((f64::MAX, f64::MIN), |(min, max), v| {
            (min.min(*v), max.max(*v))
        });
    let (y_min, y_max) = if points.is_empty() {
        (0.0, 1.0)
    } else {
        // Pad so a flat series still shows a line inside the plot.
        (y_min - 1.0, y_max + 1.0)
    };

    let x_max = (points.len().saturating_sub(1)).max(1) as f64;
    let x_labels: Vec<String> = match spec.labels.as_slice() {
        [] => vec![],
        [only] => vec![only.clone()],
        labels => vec![
            labels[0].clone(),
            labels[labels.len() - 1].clone(),
        ],
    };

    let color = match target {
        ChartTarget::Temperature => theme::STATUS_ORANGE,
        ChartTarget::Vibration => theme::ACCENT,
    };
    let datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(theme::TEXT_MUTED)),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(vec![format!("{y_min:.1}"), format!("{y_max:.1}")])
                .style(Style::default().fg(theme::TEXT_MUTED)),
        );
    frame.render_widget(chart, area);
}

fn draw_maintenance_history(frame: &mut Frame, area: Rect, detail: &DetailView) {
    let mut lines = vec![Line::from(Span::styled(
        "Maintenance History",
        Style::default()
            .fg(theme::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD),
    ))];
    if detail.maintenance.is_empty() {
        lines.push(Line::from(Span::styled(
            "No maintenance recorded",
            Style::default().fg(theme::TEXT_MUTED),
        )));
    } else {
        for row in &detail.maintenance {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", row.when),
                    Style::default().fg(theme::TEXT_MUTED),
                ),
                Span::styled(
                    format!("{}: ", row.activity),
                    Style::default().fg(theme::ACCENT),
                ),
                Span::styled(
                    row.description.clone(),
                    Style::default().fg(theme::TEXT_SECONDARY),
                ),
                Span::styled(
                    if row.technician.is_empty() {
                        String::new()
                    } else {
                        format!(" ({})", row.technician)
                    },
                    Style::default().fg(theme::TEXT_MUTED),
                ),
            ]));
        }
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_maintenance_form(frame: &mut Frame, area: Rect, form: &MaintenanceForm) {
    let modal = centered_rect(area, 50, 40);
    frame.render_widget(Clear, modal);

    let field_style = |field: FormField| {
        if form.field == field {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::TEXT_SECONDARY)
        }
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Activity:    ", field_style(FormField::Activity)),
            Span::styled(
                format!("◂ {} ▸", form.activity().label()),
                Style::default().fg(theme::TEXT_PRIMARY),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Description: ", field_style(FormField::Description)),
            Span::styled(
                format!("{}_", form.description),
                Style::default().fg(theme::TEXT_PRIMARY),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Technician:  ", field_style(FormField::Technician)),
            Span::styled(
                format!("{}_", form.technician),
                Style::default().fg(theme::TEXT_PRIMARY),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Tab next field · ◂▸ change activity · Enter submit · Esc cancel",
            Style::default().fg(theme::TEXT_MUTED),
        )),
    ];

    let dialog = Paragraph::new(lines).block(
        Block::bordered()
            .title(format!("Schedule Maintenance · {}", form.machine_id))
            .border_style(Style::default().fg(theme::BORDER_ACTIVE))
            .style(Style::default().bg(theme::POPUP_BG)),
    );
    frame.render_widget(dialog, modal);
}
