//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Routing
//!
//! Which component sees a key depends on `App::view`:
//!
//! ```text
//! List        → CustomerTableState  (search, paging, row commands)
//! Add / Edit  → CustomerFormState   (typing, Tab, Enter, Esc)
//! Details     → DetailsState        (scroll, e, d, Esc)
//! Delete      → handle_confirm_event (y / n)
//! ```
//!
//! Components emit their own small event enums; `route_event` turns those
//! into `Action`s. Ctrl+C quits from anywhere.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (store call in flight): draws every ~80ms to animate the spinner.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::seed::Dataset;
use crate::core::state::App;
use crate::core::view::ViewState;
use crate::store::{self, CustomerStore, SimulatedStore, StoreRequest};
use crate::tui::component::EventHandler;
use crate::tui::components::delete_confirm::handle_confirm_event;
use crate::tui::components::{
    ConfirmEvent, CustomerFormState, CustomerTableState, DetailsEvent, DetailsState, FormEvent,
    TableEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub table: CustomerTableState,
    /// Present while the Add/Edit view is open.
    pub form: Option<CustomerFormState>,
    pub details: DetailsState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            table: CustomerTableState::new(),
            form: None,
            details: DetailsState::default(),
        }
    }

    /// Bring component state in line with the App after an update:
    /// refresh the on-screen row ids, open or drop the form, reset the
    /// details scroll when leaving that view.
    pub fn sync(&mut self, app: &App) {
        let ids = app.visible().rows.iter().map(|c| c.id.clone()).collect();
        self.table.sync_rows(ids);

        match &app.view {
            ViewState::Add => {
                if self.form.as_ref().is_none_or(|f| f.editing.is_some()) {
                    self.form = Some(CustomerFormState::new_add());
                }
            }
            ViewState::Edit(customer) => {
                let stale = self
                    .form
                    .as_ref()
                    .is_none_or(|f| f.editing.as_deref() != Some(customer.id.as_str()));
                if stale {
                    self.form = Some(CustomerFormState::edit(customer));
                }
            }
            _ => self.form = None,
        }

        if !matches!(app.view, ViewState::Details(_)) {
            self.details = DetailsState::default();
        }
    }
}

/// Translate a terminal event into a core action for the active view.
pub fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    if matches!(event, TuiEvent::Resize) {
        return None;
    }

    match &app.view {
        ViewState::List => match tui.table.handle_event(event)? {
            TableEvent::SearchChanged(text) => Some(Action::SetSearch(text)),
            TableEvent::CycleFilter => Some(Action::CycleStatusFilter),
            TableEvent::CycleSort => Some(Action::CycleSort),
            TableEvent::NextPage => Some(Action::NextPage),
            TableEvent::PreviousPage => Some(Action::PreviousPage),
            TableEvent::Add => Some(Action::OpenAdd),
            TableEvent::View(id) => Some(Action::OpenDetails(id)),
            TableEvent::Edit(id) => Some(Action::OpenEdit(id)),
            TableEvent::Delete(id) => Some(Action::OpenDelete(id)),
            TableEvent::Quit => Some(Action::Quit),
        },
        ViewState::Add | ViewState::Edit(_) => match tui.form.as_mut()?.handle_event(event)? {
            FormEvent::Submit(draft) => Some(Action::Save(draft)),
            FormEvent::Cancel => Some(Action::Cancel),
        },
        ViewState::Details(customer) => match tui.details.handle_event(event)? {
            DetailsEvent::Edit => Some(Action::OpenEdit(customer.id.clone())),
            DetailsEvent::Delete => Some(Action::OpenDelete(customer.id.clone())),
            DetailsEvent::Close => Some(Action::Cancel),
        },
        ViewState::Delete(_) => match handle_confirm_event(event)? {
            ConfirmEvent::Confirm => Some(Action::ConfirmDelete),
            ConfirmEvent::Cancel => Some(Action::Cancel),
        },
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol makes a lone Esc unambiguous; terminals
        // without it ignore the sequence
        execute!(
            stdout(),
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig, dataset: Dataset) -> std::io::Result<()> {
    let store: Arc<dyn CustomerStore> = Arc::new(SimulatedStore::new(config.store_delay));
    let app = App::from_config(dataset, &config);
    info!(
        "Starting with {} customers, page size {}, store '{}'",
        app.customers.len(),
        app.query.page_size,
        store.name()
    );

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    if let Err(e) = &terminal_mode_guard {
        warn!("Could not enable terminal modes: {}", e);
    }

    let result = event_loop(&mut terminal, app, store, config.store_timeout);

    drop(terminal_mode_guard);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    mut app: App,
    store: Arc<dyn CustomerStore>,
    store_timeout: Duration,
) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // The in-flight store call, aborted if the user quits mid-save
    let mut active_abort_handles: Vec<tokio::task::AbortHandle> = Vec::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.sync(&app);

        let animating = app.is_busy();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&app, &mut tui, &event) else {
                continue;
            };
            match update(&mut app, action) {
                Effect::Quit => break 'main,
                Effect::Persist(request) => {
                    active_abort_handles.push(spawn_store_request(
                        store.clone(),
                        request,
                        store_timeout,
                        tx.clone(),
                    ));
                }
                Effect::None => {}
            }
            // Later events in this batch must see the rows and form they act on
            tui.sync(&app);
        }

        // Handle background task actions (store completions)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                break 'main;
            }
        }
        active_abort_handles.retain(|handle| !handle.is_finished());
    }

    for handle in active_abort_handles.drain(..) {
        info!("Aborting in-flight store call on quit");
        handle.abort();
    }
    Ok(())
}

/// Run `request` on a tokio task and report back with
/// `Action::StoreCompleted` on `tx`.
pub fn spawn_store_request(
    store: Arc<dyn CustomerStore>,
    request: StoreRequest,
    timeout: Duration,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    info!("Spawning store {} on '{}'", request.label(), store.name());
    let handle = tokio::spawn(async move {
        let label = request.label();
        let result = store::execute(store.as_ref(), request, timeout).await;
        match &result {
            Ok(outcome) => debug!("Store {} finished: {:?}", label, outcome),
            Err(e) => warn!("Store {} failed: {}", label, e),
        }
        if tx.send(Action::StoreCompleted(result)).is_err() {
            warn!("Failed to send store result for {}: receiver dropped", label);
        }
    });
    handle.abort_handle()
}
