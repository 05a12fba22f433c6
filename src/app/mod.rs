//! Application module
//!
//! Contains the main application loop, key handling and the background
//! report dispatch.
//!
//! # Module Structure
//! - `state` - Screen-level state (AppState, focus enums)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppState, ContactField, DetailsField};

use crate::catalog::Catalog;
use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::config::AppConfig;
use crate::dispatch::{Acknowledgement, DispatchError, ReportDispatcher};
use crate::error::{Result, SavingsError};
use crate::input::InputResult;
use crate::ui::UiRenderer;
use crate::wizard::{StepKind, WizardStep};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Messages sent from the dispatch thread to the main UI thread
#[derive(Debug)]
pub enum DispatchMessage {
    /// The report request finished, successfully or not
    Finished(std::result::Result<Acknowledgement, DispatchError>),
}

/// Main application struct
pub struct App {
    state: AppState,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints
    keybinding_context: KeybindingContext,
    dispatcher: Arc<dyn ReportDispatcher>,
    config: AppConfig,
    redirect_base: Url,
    /// Channel sender for dispatch outcomes (cloned to threads)
    dispatch_tx: Sender<DispatchMessage>,
    /// Channel receiver for dispatch outcomes (polled in main loop)
    dispatch_rx: Receiver<DispatchMessage>,
    should_quit: bool,
}

impl App {
    /// Create a new application instance
    pub fn new(catalog: Arc<Catalog>, dispatcher: Arc<dyn ReportDispatcher>, config: AppConfig) -> Self {
        info!("Creating new App instance");
        let (dispatch_tx, dispatch_rx) = mpsc::channel();
        let redirect_base = config.redirect_base();

        Self {
            state: AppState::new(catalog),
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            dispatcher,
            config,
            redirect_base,
            dispatch_tx,
            dispatch_rx,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Follow-up form URL once the report has been delivered
    pub fn redirect(&self) -> Option<&Url> {
        match self.state.wizard.step() {
            WizardStep::Submitted { redirect } => Some(redirect),
            _ => None,
        }
    }

    /// Toggle help overlay visibility
    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
    }

    /// Run the main loop until the user quits.
    ///
    /// Returns the follow-up URL when a report was delivered.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<Option<Url>> {
        info!("Starting main application loop");

        while !self.should_quit {
            self.poll_dispatch();

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    // Windows terminals also report releases
                    if key_event.kind == KeyEventKind::Press {
                        self.handle_key_event(key_event);
                    }
                }
            }

            terminal
                .draw(|f| {
                    self.ui_renderer
                        .render(f, &self.state, &self.keybinding_context);
                })
                .map_err(|e| SavingsError::terminal(format!("Failed to draw frame: {}", e)))?;
        }

        info!("Main loop finished");
        Ok(self.redirect().cloned())
    }

    /// Process finished dispatches without blocking.
    ///
    /// Returns true if an outcome was applied.
    pub fn poll_dispatch(&mut self) -> bool {
        let mut applied = false;
        while let Ok(msg) = self.dispatch_rx.try_recv() {
            let DispatchMessage::Finished(outcome) = msg;
            applied = true;

            match self
                .state
                .wizard
                .finish_submission(outcome, &self.redirect_base)
            {
                Ok(redirect) => self.follow_redirect(&redirect),
                Err(e) => debug!("submission not completed: {}", e),
            }
        }
        applied
    }

    fn follow_redirect(&mut self, redirect: &Url) {
        if !self.config.open_browser {
            self.state.status_message = format!("Continue at {}", redirect);
            return;
        }
        match open::that(redirect.as_str()) {
            Ok(()) => {
                self.state.status_message = "Opened the follow-up form in your browser".to_string();
            }
            Err(e) => {
                warn!("Could not open browser: {}", e);
                self.state.status_message = format!("Open this link to continue: {}", redirect);
            }
        }
    }

    /// Handle a key press. Refused wizard actions surface through its notice.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        if self.state.help_visible {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')
            ) {
                self.toggle_help();
            }
            return;
        }

        // Printable keys belong to the focused text field
        if let Some(field) = self.state.focused_text_field() {
            match field.handle_input(key_event) {
                InputResult::Changed => {
                    self.state.sync_fields();
                    self.state.wizard.clear_notice();
                    return;
                }
                InputResult::Ignored => return,
                InputResult::Unhandled => {}
            }
        }

        let step = self.state.wizard.step().kind();
        let Some(action) =
            self.keybinding_context
                .action_for(step, key_event.code, key_event.modifiers)
        else {
            return;
        };
        debug!(?action, %step, "key action");
        self.perform(step, action);
    }

    fn perform(&mut self, step: StepKind, action: KeyAction) {
        match (step, action) {
            (_, KeyAction::Quit) => self.should_quit = true,
            (_, KeyAction::Help) => self.toggle_help(),
            (_, KeyAction::Back) => {
                if self.state.wizard.back().is_ok() {
                    self.state.status_message.clear();
                }
            }

            (StepKind::CategorySelection, KeyAction::NavigateUp) => {
                self.state.move_category_cursor(false)
            }
            (StepKind::CategorySelection, KeyAction::NavigateDown) => {
                self.state.move_category_cursor(true)
            }
            (StepKind::CategorySelection, KeyAction::Select) => self.choose_category(),

            (StepKind::ProjectDetails, KeyAction::NavigateUp) => {
                self.state.move_details_focus(false)
            }
            (StepKind::ProjectDetails, KeyAction::NavigateDown | KeyAction::NextField) => {
                self.state.move_details_focus(true)
            }
            (StepKind::ProjectDetails, KeyAction::PreviousOption) => {
                self.state.cycle_details_option(false)
            }
            (StepKind::ProjectDetails, KeyAction::NextOption) => {
                self.state.cycle_details_option(true)
            }
            (StepKind::ProjectDetails, KeyAction::Select) => {
                self.state.sync_fields();
                if self.state.wizard.calculate().is_ok() {
                    self.state.contact_focus = ContactField::FirstName;
                    self.state.status_message =
                        "Enter your details to receive the full report".to_string();
                }
            }

            (StepKind::ResultsSummary, KeyAction::NavigateUp) => {
                self.state.move_contact_focus(false)
            }
            (StepKind::ResultsSummary, KeyAction::NavigateDown | KeyAction::NextField) => {
                self.state.move_contact_focus(true)
            }
            (StepKind::ResultsSummary, KeyAction::Select) => self.submit(),
            (StepKind::ResultsSummary, KeyAction::FullReport) => {
                self.state.sync_fields();
                let _ = self.state.wizard.view_full_report();
            }

            _ => {}
        }
    }

    fn choose_category(&mut self) {
        let Some(category) = self.state.highlighted_category() else {
            return;
        };
        if self.state.wizard.select_category(category).is_ok()
            && self.state.wizard.continue_to_details().is_ok()
        {
            self.state.details_focus = DetailsField::AreaSize;
            self.state.status_message = format!("Project details for {}", category.label());
        }
    }

    /// Start a dispatch on a background thread.
    fn submit(&mut self) {
        self.state.sync_fields();
        let record = match self.state.wizard.begin_submission() {
            Ok(record) => record,
            Err(e) => {
                debug!("submission refused: {}", e);
                return;
            }
        };

        let tx = self.dispatch_tx.clone();
        let dispatcher = Arc::clone(&self.dispatcher);
        thread::spawn(move || {
            let outcome = dispatcher.send_report(&record);
            // Receiver is gone only if the app already exited
            let _ = tx.send(DispatchMessage::Finished(outcome));
        });
        self.state.status_message = "Sending your report...".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::ReportRecord;
    use crossterm::event::KeyModifiers;
    use std::sync::Mutex;
    use std::time::Instant;

    struct RecordingDispatcher {
        sent: Mutex<Vec<ReportRecord>>,
        fail: bool,
    }

    impl ReportDispatcher for RecordingDispatcher {
        fn send_report(
            &self,
            record: &ReportRecord,
        ) -> std::result::Result<Acknowledgement, DispatchError> {
            self.sent.lock().unwrap().push(record.clone());
            if self.fail {
                Err(DispatchError::Transport("connection refused".into()))
            } else {
                Ok(Acknowledgement(serde_json::json!({"message": "ok"})))
            }
        }
    }

    fn app(fail: bool) -> (App, Arc<RecordingDispatcher>) {
        let dispatcher = Arc::new(RecordingDispatcher {
            sent: Mutex::new(Vec::new()),
            fail,
        });
        let config = AppConfig {
            open_browser: false,
            ..AppConfig::default()
        };
        let app = App::new(Arc::new(Catalog::standard()), dispatcher.clone(), config);
        (app, dispatcher)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn wait_for_dispatch(app: &mut App) {
        let start = Instant::now();
        while !app.poll_dispatch() {
            assert!(start.elapsed() < Duration::from_secs(5), "dispatch never finished");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn reach_results(app: &mut App) {
        press(app, KeyCode::Enter);
        press(app, KeyCode::Enter);
        assert_eq!(app.state().wizard.step().kind(), StepKind::ResultsSummary);
    }

    fn fill_contact(app: &mut App) {
        type_text(app, "Ada");
        press(app, KeyCode::Tab);
        type_text(app, "Lovelace");
        press(app, KeyCode::Tab);
        type_text(app, "ada@example.com");
    }

    #[test]
    fn test_gypcrete_flow_reaches_results() {
        let (mut app, _) = app(false);
        reach_results(&mut app);
        let result = app.state().wizard.step().result().unwrap();
        assert_eq!(result.figures().total_savings, 16_650);
    }

    #[test]
    fn test_q_is_typed_into_contact_field() {
        let (mut app, _) = app(false);
        reach_results(&mut app);
        type_text(&mut app, "q");
        assert!(!app.should_quit());
        assert_eq!(app.state().wizard.contact().first_name, "q");
    }

    #[test]
    fn test_successful_submission_reaches_submitted() {
        let (mut app, dispatcher) = app(false);
        reach_results(&mut app);
        fill_contact(&mut app);
        press(&mut app, KeyCode::Enter);
        assert!(app.state().wizard.step().is_pending());

        wait_for_dispatch(&mut app);
        let redirect = app.redirect().unwrap();
        assert!(redirect.as_str().contains("firstname=Ada"));
        assert_eq!(dispatcher.sent.lock().unwrap().len(), 1);
        assert_eq!(dispatcher.sent.lock().unwrap()[0].email, "ada@example.com");
    }

    #[test]
    fn test_failed_submission_keeps_contact() {
        let (mut app, _) = app(true);
        reach_results(&mut app);
        fill_contact(&mut app);
        press(&mut app, KeyCode::Enter);
        wait_for_dispatch(&mut app);

        let wizard = &app.state().wizard;
        assert_eq!(wizard.step().kind(), StepKind::ResultsSummary);
        assert!(!wizard.step().is_pending());
        assert_eq!(wizard.contact().last_name, "Lovelace");
        assert!(wizard.notice().is_some());
    }

    #[test]
    fn test_help_swallows_keys_until_closed() {
        let (mut app, _) = app(false);
        press(&mut app, KeyCode::F(1));
        assert!(app.state().help_visible);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state().wizard.step().kind(), StepKind::CategorySelection);
        press(&mut app, KeyCode::Esc);
        assert!(!app.state().help_visible);
    }

    #[test]
    fn test_ctrl_c_quits_from_text_step() {
        let (mut app, _) = app(false);
        reach_results(&mut app);
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }
}
