//! TUI entry point and run loop.
//!
//! The loop owns the engine, the chart registry, and the UI state. Each
//! iteration drains pending messages into the engine, projects a view
//! model, draws one frame, and then polls the keyboard for up to 50ms.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{mpsc, watch};

use auramon_client::actions::spawn_ticker;
use auramon_client::{HttpGateway, Message, Settings, SyncEngine};
use auramon_core::prelude::*;
use auramon_core::types::{MaintenanceActivity, MaintenanceRequest};

use crate::charts::TuiChartRenderer;
use crate::event::{self, InputKey};
use crate::render;
use crate::terminal::install_panic_hook;
use crate::view_model::{DashboardView, MaintenanceForm, UiMode, UiState};

/// Message channel depth between background tasks and the engine.
const CHANNEL_CAPACITY: usize = 256;

/// Whether the run loop should keep going after a key press.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the dashboard until the user quits.
pub async fn run(settings: Settings) -> Result<()> {
    let gateway = Arc::new(HttpGateway::new(
        &settings.api_base_url,
        Duration::from_millis(settings.request_timeout_ms),
    )?);

    let (msg_tx, mut msg_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
    let mut engine = SyncEngine::new(gateway, settings.clone(), msg_tx.clone());

    // First load happens before the terminal takes over, so a fast failure
    // (bad URL, backend down) is visible in plain stderr logs too.
    engine.initialize().await;

    install_panic_hook();
    let mut terminal = ratatui::init();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ticker = spawn_ticker(
        settings.effective_refresh_interval_ms(),
        msg_tx.clone(),
        shutdown_rx,
    );

    let result = run_loop(&mut terminal, &mut engine, &mut msg_rx).await;

    // Shut down the ticker before restoring the terminal; an abandoned
    // ticker would keep the channel alive.
    let _ = shutdown_tx.send(true);
    let _ = tokio::time::timeout(Duration::from_millis(500), ticker).await;
    ratatui::restore();

    result
}

async fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    engine: &mut SyncEngine<HttpGateway>,
    msg_rx: &mut mpsc::Receiver<Message>,
) -> Result<()> {
    let mut renderer = TuiChartRenderer::new();
    let mut ui = UiState::new();
    let mut rng = rand::thread_rng();

    loop {
        // Apply everything the background tasks produced since the last
        // frame, in arrival order.
        while let Ok(msg) = msg_rx.try_recv() {
            engine.process_message(msg, &mut renderer);
        }
        engine.prune_notifications();

        let jitter = rng.gen_range(-5.0..=5.0);
        let view = DashboardView::project(engine.store(), engine.detail_session(), jitter);

        terminal
            .draw(|frame| render::draw(frame, &view, &ui, &renderer, engine.notifications()))
            .map_err(|e| Error::terminal(format!("draw failed: {e}")))?;

        if let Some(key) = event::poll()? {
            if handle_key(engine, &mut ui, &mut renderer, &view, key) == Flow::Quit {
                return Ok(());
            }
        }
    }
}

fn handle_key(
    engine: &mut SyncEngine<HttpGateway>,
    ui: &mut UiState,
    renderer: &mut TuiChartRenderer,
    view: &DashboardView,
    key: InputKey,
) -> Flow {
    if key == InputKey::CharCtrl('c') {
        return Flow::Quit;
    }
    match ui.mode {
        UiMode::Dashboard => handle_dashboard_key(engine, ui, view, key),
        UiMode::Detail => handle_detail_key(engine, ui, renderer, key),
        UiMode::MaintenanceForm => handle_form_key(engine, ui, key),
    }
}

fn handle_dashboard_key(
    engine: &mut SyncEngine<HttpGateway>,
    ui: &mut UiState,
    view: &DashboardView,
    key: InputKey,
) -> Flow {
    match key {
        InputKey::Char('q') => return Flow::Quit,
        InputKey::Up | InputKey::Char('k') => ui.move_selection(-1, view.machines.len()),
        InputKey::Down | InputKey::Char('j') => ui.move_selection(1, view.machines.len()),
        InputKey::Enter => {
            if let Some(card) = view.machines.get(ui.selected) {
                engine.open_detail(card.machine_id.clone());
                ui.mode = UiMode::Detail;
            }
        }
        InputKey::Char('r') => engine.force_refresh(),
        InputKey::Esc => engine.dismiss_notifications(),
        _ => {}
    }
    Flow::Continue
}

fn handle_detail_key(
    engine: &mut SyncEngine<HttpGateway>,
    ui: &mut UiState,
    renderer: &mut TuiChartRenderer,
    key: InputKey,
) -> Flow {
    match key {
        InputKey::Esc | InputKey::Char('q') => {
            engine.close_detail(renderer);
            ui.mode = UiMode::Dashboard;
        }
        InputKey::Char('m') => {
            if let Some(machine_id) = engine.detail_session().selected() {
                ui.form = Some(MaintenanceForm::new(machine_id.to_string()));
                ui.mode = UiMode::MaintenanceForm;
            }
        }
        InputKey::Char('a') => {
            // Quick acknowledge: logs an inspection against the machine so
            // the action shows up in its maintenance history.
            if let Some(machine_id) = engine.detail_session().selected() {
                engine.submit_maintenance(MaintenanceRequest {
                    machine_id: machine_id.to_string(),
                    activity_type: MaintenanceActivity::Inspection,
                    description: "Issues acknowledged by operator - monitoring closely"
                        .to_string(),
                    technician: "Operator".to_string(),
                });
            }
        }
        InputKey::Char('r') => engine.force_refresh(),
        _ => {}
    }
    Flow::Continue
}

fn handle_form_key(
    engine: &mut SyncEngine<HttpGateway>,
    ui: &mut UiState,
    key: InputKey,
) -> Flow {
    use crate::view_model::FormField;

    // Esc and Enter leave the form, so they must not hold a borrow of it.
    if key == InputKey::Esc {
        ui.form = None;
        ui.mode = UiMode::Detail;
        return Flow::Continue;
    }
    if key == InputKey::Enter {
        let request = ui
            .form
            .as_ref()
            .filter(|form| form.is_submittable())
            .map(|form| MaintenanceRequest {
                machine_id: form.machine_id.clone(),
                activity_type: form.activity(),
                description: form.description.clone(),
                technician: if form.technician.trim().is_empty() {
                    "Operator".to_string()
                } else {
                    form.technician.clone()
                },
            });
        if let Some(request) = request {
            engine.submit_maintenance(request);
            ui.form = None;
            ui.mode = UiMode::Detail;
        }
        return Flow::Continue;
    }

    let Some(form) = ui.form.as_mut() else {
        ui.mode = UiMode::Detail;
        return Flow::Continue;
    };

    match key {
        InputKey::Tab => form.next_field(),
        InputKey::BackTab => form.prev_field(),
        InputKey::Left if form.field == FormField::Activity => form.cycle_activity(-1),
        InputKey::Right if form.field == FormField::Activity => form.cycle_activity(1),
        InputKey::Up if form.field == FormField::Activity => form.cycle_activity(-1),
        InputKey::Down if form.field == FormField::Activity => form.cycle_activity(1),
        InputKey::Char(c) => match form.field {
            FormField::Description => form.description.push(c),
            FormField::Technician => form.technician.push(c),
            FormField::Activity => {}
        },
        InputKey::Backspace => match form.field {
            FormField::Description => {
                form.description.pop();
            }
            FormField::Technician => {
                form.technician.pop();
            }
            FormField::Activity => {}
        },
        _ => {}
    }
    Flow::Continue
}
