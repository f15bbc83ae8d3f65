//! Key-driven state machines for the two widgets.
//!
//! `App` never performs I/O. Key handlers return an [`Effect`] that the event
//! loop carries out, and submission outcomes come back through
//! [`App::on_submitted`].

pub mod profile;
pub mod typing;

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::api::{ApiResponse, SubmitResult};
use crate::runtime::SubmissionJob;
pub use profile::{ProfileStage, ProfileView};
pub use typing::TypingView;

/// Pause between a successful save and the confirmation screen.
pub const SUCCESS_DELAY: Duration = Duration::from_secs(2);

/// Work requested by a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Submit(SubmissionJob),
    OpenDashboard,
    Quit,
}

/// Lifecycle of the POST that follows a finished test.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    NotSent,
    Pending,
    Saved {
        response: ApiResponse,
        saved_at: Instant,
    },
    Confirmed(ApiResponse),
    Failed(String),
}

impl Submission {
    /// Promote `Saved` to `Confirmed` once the success delay has passed.
    /// Returns true when the state changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        if let Submission::Saved { response, saved_at } = self {
            if now.saturating_duration_since(*saved_at) >= SUCCESS_DELAY {
                *self = Submission::Confirmed(response.clone());
                return true;
            }
        }
        false
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Submission::Confirmed(_))
    }
}

#[derive(Debug, Clone)]
pub enum AppState {
    Typing(TypingView),
    Profile(ProfileView),
}

#[derive(Debug, Clone)]
pub struct App {
    pub state: AppState,
    pub dashboard_url: String,
}

impl App {
    pub fn typing(dashboard_url: impl Into<String>) -> Self {
        Self {
            state: AppState::Typing(TypingView::default()),
            dashboard_url: dashboard_url.into(),
        }
    }

    pub fn profile(dashboard_url: impl Into<String>) -> Self {
        Self {
            state: AppState::Profile(ProfileView::default()),
            dashboard_url: dashboard_url.into(),
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Effect {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Effect::Quit;
        }
        match &mut self.state {
            AppState::Typing(view) => view.on_key(key),
            AppState::Profile(view) => view.on_key(key),
        }
    }

    /// Pasted text is dropped so every character has to be typed.
    pub fn on_paste(&mut self, text: &str) -> Effect {
        debug!(chars = text.chars().count(), "paste ignored");
        Effect::None
    }

    /// Periodic update; returns true when something visible changed.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        match &mut self.state {
            AppState::Typing(view) => view.on_tick(now),
            AppState::Profile(_) => false,
        }
    }

    pub fn on_submitted(&mut self, outcome: SubmitResult, now: Instant) {
        match &mut self.state {
            AppState::Typing(view) => view.on_submitted(outcome, now),
            AppState::Profile(view) => view.on_submitted(outcome, now),
        }
    }
}

/// Plain character input, excluding control and alt chords.
pub(crate) fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response() -> ApiResponse {
        ApiResponse {
            status: "success".into(),
            message: None,
            test_id: Some(3),
            profile_id: None,
        }
    }

    #[test]
    fn saved_is_confirmed_after_delay() {
        let saved_at = Instant::now();
        let mut submission = Submission::Saved {
            response: response(),
            saved_at,
        };

        assert!(!submission.advance(saved_at + Duration::from_millis(1500)));
        assert!(!submission.is_confirmed());
        assert!(submission.advance(saved_at + SUCCESS_DELAY));
        assert_eq!(submission, Submission::Confirmed(response()));
        assert!(!submission.advance(saved_at + SUCCESS_DELAY * 2));
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let mut app = App::typing("http://localhost:8000/app/");
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Effect::Quit
        );
        assert_eq!(
            app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Effect::Quit
        );
    }

    #[test]
    fn control_chords_are_not_typed() {
        assert_eq!(
            typed_char(&KeyEvent::new(KeyCode::Char('v'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            typed_char(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)),
            None
        );
        assert_eq!(
            typed_char(&KeyEvent::new(KeyCode::Char('Á'), KeyModifiers::SHIFT)),
            Some('Á')
        );
    }

    #[test]
    fn paste_does_nothing() {
        let mut app = App::typing("http://localhost:8000/app/");
        assert_eq!(app.on_paste("A tecnologia"), Effect::None);
    }
}
