use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use tracing::{error, info};

use super::{typed_char, Effect, Submission};
use crate::api::SubmitResult;
use crate::runtime::SubmissionJob;
use crate::typing::{TypingStage, TypingTest};

/// Typing test plus what the candidate sees after it.
#[derive(Debug, Clone)]
pub struct TypingView {
    pub test: TypingTest,
    pub submission: Submission,
    /// Blocking error message; any key dismisses it.
    pub popup: Option<String>,
}

impl Default for TypingView {
    fn default() -> Self {
        Self {
            test: TypingTest::new(),
            submission: Submission::NotSent,
            popup: None,
        }
    }
}

impl TypingView {
    pub fn on_key(&mut self, key: KeyEvent) -> Effect {
        if self.popup.take().is_some() {
            return Effect::None;
        }

        match self.test.stage() {
            TypingStage::Welcome => {
                if key.code == KeyCode::Enter {
                    self.test.start();
                }
                Effect::None
            }
            TypingStage::Phase(_) => self.on_phase_key(key),
            TypingStage::Final => match key.code {
                KeyCode::Char('d') if self.submission.is_confirmed() => Effect::OpenDashboard,
                KeyCode::Char('q') | KeyCode::Enter if self.submission.is_confirmed() => {
                    Effect::Quit
                }
                _ => Effect::None,
            },
        }
    }

    fn on_phase_key(&mut self, key: KeyEvent) -> Effect {
        match key.code {
            KeyCode::Backspace => {
                self.test.backspace();
                Effect::None
            }
            // the finish button stays disabled until something is typed
            KeyCode::Enter if self.test.can_finish() => match self.test.finish_phase() {
                Ok(TypingStage::Final) => {
                    self.submission = Submission::Pending;
                    Effect::Submit(SubmissionJob::Typing(self.test.results().to_vec()))
                }
                Ok(_) => Effect::None,
                Err(err) => {
                    error!(%err, "finish phase refused");
                    Effect::None
                }
            },
            _ => {
                if let Some(c) = typed_char(&key) {
                    self.test.write(c);
                }
                Effect::None
            }
        }
    }

    pub fn on_tick(&mut self, now: Instant) -> bool {
        match self.test.stage() {
            TypingStage::Phase(_) => {
                let started = self.test.session().is_some_and(|s| s.has_started());
                self.test.on_tick(now);
                started
            }
            TypingStage::Final => self.submission.advance(now),
            TypingStage::Welcome => false,
        }
    }

    pub fn on_submitted(&mut self, outcome: SubmitResult, now: Instant) {
        match outcome {
            Ok(response) => {
                info!(test_id = ?response.test_id, "typing test saved");
                self.submission = Submission::Saved {
                    response,
                    saved_at: now,
                };
            }
            Err(err) => {
                error!(%err, "typing test not saved");
                let message = err.user_message();
                self.popup = Some(message.clone());
                self.submission = Submission::Failed(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiResponse};
    use crate::app::SUCCESS_DELAY;
    use crate::typing::PHRASES;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(view: &mut TypingView, text: &str) {
        for c in text.chars() {
            assert_eq!(view.on_key(key(KeyCode::Char(c))), Effect::None);
        }
    }

    fn finished_view() -> (TypingView, Effect) {
        let mut view = TypingView::default();
        view.on_key(key(KeyCode::Enter));
        let mut effect = Effect::None;
        for phrase in PHRASES {
            type_text(&mut view, phrase);
            effect = view.on_key(key(KeyCode::Enter));
        }
        (view, effect)
    }

    #[test]
    fn enter_starts_then_is_ignored_on_empty_input() {
        let mut view = TypingView::default();
        type_text(&mut view, "x");
        assert_eq!(view.test.stage(), TypingStage::Welcome);

        view.on_key(key(KeyCode::Enter));
        assert_eq!(view.test.stage(), TypingStage::Phase(0));

        view.on_key(key(KeyCode::Enter));
        assert_eq!(view.test.stage(), TypingStage::Phase(0));
        assert!(view.test.results().is_empty());
    }

    #[test]
    fn backspace_edits_input() {
        let mut view = TypingView::default();
        view.on_key(key(KeyCode::Enter));
        type_text(&mut view, "Ax");
        view.on_key(key(KeyCode::Backspace));
        assert_eq!(view.test.session().unwrap().input, "A");
    }

    #[test]
    fn last_phase_requests_submission() {
        let (view, effect) = finished_view();
        assert_eq!(view.test.stage(), TypingStage::Final);
        assert_eq!(view.submission, Submission::Pending);
        match effect {
            Effect::Submit(SubmissionJob::Typing(results)) => {
                assert_eq!(results.len(), 3);
                assert_eq!(results, view.test.results());
            }
            other => panic!("expected typing submission, got {other:?}"),
        }
    }

    #[test]
    fn success_confirms_after_delay() {
        let (mut view, _) = finished_view();
        let now = Instant::now();
        view.on_submitted(
            Ok(ApiResponse {
                status: "success".into(),
                message: Some("Teste salvo com sucesso".into()),
                test_id: Some(9),
                profile_id: None,
            }),
            now,
        );
        assert!(!view.on_tick(now));
        assert_eq!(view.on_key(key(KeyCode::Char('d'))), Effect::None);

        assert!(view.on_tick(now + SUCCESS_DELAY));
        assert!(view.submission.is_confirmed());
        assert_eq!(view.on_key(key(KeyCode::Char('d'))), Effect::OpenDashboard);
        assert_eq!(view.on_key(key(KeyCode::Enter)), Effect::Quit);
    }

    #[test]
    fn failure_shows_popup_until_dismissed() {
        let (mut view, _) = finished_view();
        view.on_submitted(
            Err(ApiError::Rejected {
                message: "Scores incompletos".into(),
            }),
            Instant::now(),
        );
        assert_eq!(
            view.popup.as_deref(),
            Some("Erro ao salvar resultados: Scores incompletos")
        );

        assert_eq!(view.on_key(key(KeyCode::Enter)), Effect::None);
        assert!(view.popup.is_none());
        assert!(matches!(view.submission, Submission::Failed(_)));
    }
}
