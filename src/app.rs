//! Application state and core logic

use crate::config::RuntimeConfig;
use crate::state::{
    AppState, FieldDefinition, FocusTarget, Form, FormDefinition, FormPhase, RegistrationForm,
    SiteSettings, View,
};
use crate::store::FormStore;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Form to open and the entities a submission is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormTarget {
    pub form_id: Uuid,
    pub program_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
}

impl From<&RuntimeConfig> for FormTarget {
    fn from(config: &RuntimeConfig) -> Self {
        Self {
            form_id: config.form_id,
            program_id: config.program_id,
            course_id: config.course_id,
        }
    }
}

/// Result of a background store call, tagged with the modal session it belongs to
#[derive(Debug)]
pub enum StoreEvent {
    Loaded {
        session: u64,
        result: Result<(FormDefinition, Vec<FieldDefinition>), String>,
    },
    Submitted {
        session: u64,
        result: Result<(), String>,
    },
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Data store shared with background tasks
    store: Arc<dyn FormStore>,
    target: FormTarget,
    events_tx: UnboundedSender<StoreEvent>,
    events_rx: UnboundedReceiver<StoreEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance and load site settings
    pub async fn new(store: Arc<dyn FormStore>, target: FormTarget) -> Self {
        let mut state = AppState::default();

        state.settings = match store.fetch_settings().await {
            Ok(rows) => {
                let settings = SiteSettings::from_rows(rows);
                if settings.is_empty() {
                    tracing::info!("No site settings stored, using defaults");
                } else {
                    tracing::debug!(count = settings.len(), "site settings loaded");
                }
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to load site settings, using defaults: {e}");
                SiteSettings::default()
            }
        };

        let (events_tx, events_rx) = unbounded_channel();
        Self {
            state,
            store,
            target,
            events_tx,
            events_rx,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn target(&self) -> FormTarget {
        self.target
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Open a fresh registration modal and start loading its definition
    pub fn open_registration(&mut self) {
        let target = self.target;
        self.state.status_message = None;
        let session = self.state.open_registration(RegistrationForm::new(
            target.form_id,
            target.program_id,
            target.course_id,
        ));
        tracing::info!(form_id = %target.form_id, session, "opening registration form");

        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = tokio::try_join!(
                store.fetch_form(target.form_id),
                store.fetch_fields(target.form_id)
            )
            .map_err(|e| e.to_string());
            // Receiver gone means the app is shutting down
            let _ = tx.send(StoreEvent::Loaded { session, result });
        });
    }

    /// Close the modal from any phase; nothing is persisted
    pub fn close_registration(&mut self) {
        if self.state.registration.is_some() {
            tracing::debug!(session = self.state.session, "registration closed");
        }
        self.state.close_registration();
    }

    /// Validate the draft and, when clean, insert it in the background
    pub fn submit(&mut self) {
        let session = self.state.session;
        let Some(form) = self.state.registration.as_mut() else {
            return;
        };
        let was_editable = form.is_editable();
        let Some(submission) = form.begin_submit() else {
            if was_editable {
                tracing::debug!(errors = form.errors.len(), "registration has validation errors");
            }
            return;
        };

        let store = Arc::clone(&self.store);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = store
                .insert_submission(submission)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(StoreEvent::Submitted { session, result });
        });
    }

    /// Apply a finished background call to the modal it was started for
    pub fn apply_event(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Loaded { session, result } => {
                let Some(form) = self.state.registration_for(session) else {
                    tracing::debug!(session, "discarding form load for closed modal");
                    return;
                };
                match result {
                    Ok((definition, fields)) => {
                        tracing::info!(form = %definition.name, fields = fields.len(), "form loaded");
                        form.load(definition, fields);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load registration form: {e}");
                        form.load_failed(e.clone());
                        self.push_error(format!("Failed to load form: {e}"));
                    }
                }
            }
            StoreEvent::Submitted { session, result } => {
                let Some(form) = self.state.registration_for(session) else {
                    tracing::debug!(session, "discarding submit result for closed modal");
                    return;
                };
                form.finish_submit(result.is_ok());
                match result {
                    Ok(()) => {
                        tracing::info!(session, "registration submitted");
                        self.state.status_message = Some("Registration submitted".to_string());
                    }
                    Err(e) => {
                        tracing::warn!("Failed to submit registration: {e}");
                        self.push_error(format!("Failed to submit registration: {e}"));
                    }
                }
            }
        }
    }

    /// Apply every result that has arrived without waiting
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// Wait for the next background result and apply it
    #[cfg(test)]
    pub async fn process_next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.apply_event(event);
                true
            }
            None => false,
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Error dialog captures input until dismissed
        if self.state.current_error().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return;
        }

        match self.state.current_view {
            View::Landing => self.handle_landing_key(key),
            View::Registration => self.handle_registration_key(key),
        }
    }

    fn handle_landing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Enter => self.open_registration(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn handle_registration_key(&mut self, key: KeyEvent) {
        let Some(form) = self.state.registration.as_mut() else {
            self.state.current_view = View::Landing;
            return;
        };

        if key.code == KeyCode::Esc {
            self.close_registration();
            return;
        }

        match form.phase {
            FormPhase::Loading => {}
            FormPhase::Success | FormPhase::Failed(_) => {
                if key.code == KeyCode::Enter {
                    self.close_registration();
                }
            }
            FormPhase::Ready | FormPhase::Submitting => match key.code {
                KeyCode::Tab => form.next_field(),
                KeyCode::BackTab => form.prev_field(),
                KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.submit();
                }
                KeyCode::Enter => match form.focus() {
                    FocusTarget::SubmitButton => self.submit(),
                    FocusTarget::CloseButton => self.close_registration(),
                    FocusTarget::Field(_) => {
                        if !form.newline() {
                            form.next_field();
                        }
                    }
                },
                KeyCode::Left => form.cycle_choice(false),
                KeyCode::Right => form.cycle_choice(true),
                KeyCode::Char(c) => form.input_char(c),
                KeyCode::Backspace => form.backspace(),
                _ => {}
            },
        }
    }
}
