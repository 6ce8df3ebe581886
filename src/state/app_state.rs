//! Application state definitions

use super::forms::RegistrationForm;
use super::settings::SiteSettings;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Registration,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Data
    pub settings: SiteSettings,

    /// The open registration modal; dropping it discards the draft
    pub registration: Option<RegistrationForm>,
    /// Incremented each time a modal opens so late results can be matched
    pub session: u64,

    // Feedback
    pub status_message: Option<String>,
    error_queue: VecDeque<String>,
}

impl AppState {
    /// Open a fresh modal and return its session number
    pub fn open_registration(&mut self, form: RegistrationForm) -> u64 {
        self.session += 1;
        self.registration = Some(form);
        self.current_view = View::Registration;
        self.session
    }

    /// Close the modal from any phase, discarding the draft
    pub fn close_registration(&mut self) {
        self.registration = None;
        self.current_view = View::Landing;
    }

    /// The open modal if it belongs to `session`
    pub fn registration_for(&mut self, session: u64) -> Option<&mut RegistrationForm> {
        if session != self.session {
            return None;
        }
        self.registration.as_mut()
    }

    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_default_view_is_landing() {
        let state = AppState::default();
        assert_eq!(state.current_view, View::Landing);
        assert!(state.registration.is_none());
        assert_eq!(state.session, 0);
    }

    #[test]
    fn test_open_and_close_registration() {
        let mut state = AppState::default();
        let session = state.open_registration(RegistrationForm::new(Uuid::new_v4(), None, None));
        assert_eq!(session, 1);
        assert_eq!(state.current_view, View::Registration);
        assert!(state.registration_for(session).is_some());

        state.close_registration();
        assert_eq!(state.current_view, View::Landing);
        assert!(state.registration_for(session).is_none());
    }

    #[test]
    fn test_stale_session_is_rejected() {
        let mut state = AppState::default();
        let first = state.open_registration(RegistrationForm::new(Uuid::new_v4(), None, None));
        state.close_registration();
        let second = state.open_registration(RegistrationForm::new(Uuid::new_v4(), None, None));
        assert_ne!(first, second);
        assert!(state.registration_for(first).is_none());
        assert!(state.registration_for(second).is_some());
    }

    #[test]
    fn test_error_queue_is_fifo() {
        let mut state = AppState::default();
        assert!(state.current_error().is_none());
        state.push_error("first".to_string());
        state.push_error("second".to_string());
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(state.current_error().is_none());
    }
}
