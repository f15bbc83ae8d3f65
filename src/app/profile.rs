use std::time::Instant;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{error, info};

use super::{Effect, Submission};
use crate::api::SubmitResult;
use crate::runtime::SubmissionJob;
use crate::survey::questions::{MAX_ANSWER, MIN_ANSWER};
use crate::survey::{QuadrantScores, Survey, QUESTIONS_PER_PAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileStage {
    Instructions,
    Questions,
    Final,
}

/// Survey plus the cursor and warning line of the question pages.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub stage: ProfileStage,
    pub survey: Survey,
    /// Question highlighted on the current page.
    pub cursor: usize,
    pub warning: Option<String>,
    pub scores: Option<QuadrantScores>,
    pub submission: Submission,
    pub completed_at: Option<DateTime<Local>>,
}

impl Default for ProfileView {
    fn default() -> Self {
        Self {
            stage: ProfileStage::Instructions,
            survey: Survey::new(),
            cursor: 0,
            warning: None,
            scores: None,
            submission: Submission::NotSent,
            completed_at: None,
        }
    }
}

impl ProfileView {
    pub fn on_key(&mut self, key: KeyEvent) -> Effect {
        match self.stage {
            ProfileStage::Instructions => {
                if key.code == KeyCode::Enter {
                    self.stage = ProfileStage::Questions;
                    self.cursor = 0;
                }
                Effect::None
            }
            ProfileStage::Questions => self.on_question_key(key),
            // quit only once the save has reported back
            ProfileStage::Final => match key.code {
                KeyCode::Char('q') | KeyCode::Enter
                    if self.submission != Submission::Pending =>
                {
                    Effect::Quit
                }
                _ => Effect::None,
            },
        }
    }

    fn on_question_key(&mut self, key: KeyEvent) -> Effect {
        let page_len = self.survey.page_questions().len().min(QUESTIONS_PER_PAGE);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(page_len.saturating_sub(1));
            }
            KeyCode::Char(c @ '1'..='5') => {
                let value = c as u8 - b'0';
                self.answer_current(value);
                self.cursor = (self.cursor + 1).min(page_len.saturating_sub(1));
            }
            KeyCode::Left | KeyCode::Char('h') => self.step_answer(false),
            KeyCode::Right | KeyCode::Char('l') => self.step_answer(true),
            KeyCode::Char('p') | KeyCode::BackTab | KeyCode::PageUp => self.previous_step(),
            KeyCode::Char('n') | KeyCode::Tab | KeyCode::PageDown => self.next_step(),
            KeyCode::Enter if self.survey.is_last_step() => return self.submit(),
            KeyCode::Enter => self.next_step(),
            _ => {}
        }
        Effect::None
    }

    fn current_question_id(&self) -> Option<u32> {
        self.survey.page_questions().get(self.cursor).map(|q| q.id)
    }

    fn answer_current(&mut self, value: u8) {
        if let Some(id) = self.current_question_id() {
            if let Err(err) = self.survey.set_answer(id, value) {
                error!(%err, question = id, "answer rejected");
            }
        }
    }

    /// Move the highlighted question's answer one step along the scale.
    fn step_answer(&mut self, up: bool) {
        let Some(id) = self.current_question_id() else {
            return;
        };
        let value = match (self.survey.answers().get(id), up) {
            (None, true) => MIN_ANSWER,
            (None, false) => MAX_ANSWER,
            (Some(v), true) => (v + 1).min(MAX_ANSWER),
            (Some(v), false) => v.saturating_sub(1).max(MIN_ANSWER),
        };
        self.answer_current(value);
    }

    fn next_step(&mut self) {
        let before = self.survey.current_step();
        match self.survey.next_step() {
            Ok(step) => {
                self.warning = None;
                if step != before {
                    self.cursor = 0;
                }
            }
            Err(err) => self.warning = Some(err.to_string()),
        }
    }

    fn previous_step(&mut self) {
        if self.survey.previous_step() {
            self.warning = None;
            self.cursor = 0;
        }
    }

    fn submit(&mut self) -> Effect {
        match self.survey.submit() {
            Ok(submission) => {
                self.warning = None;
                self.scores = Some(submission.scores);
                self.stage = ProfileStage::Final;
                self.completed_at = Some(Local::now());
                self.submission = Submission::Pending;
                Effect::Submit(SubmissionJob::Profile(submission))
            }
            Err(err) => {
                self.warning = Some(err.to_string());
                Effect::None
            }
        }
    }

    /// The confirmation screen is already showing; outcomes are only logged.
    pub fn on_submitted(&mut self, outcome: SubmitResult, _now: Instant) {
        match outcome {
            Ok(response) => {
                info!(profile_id = ?response.profile_id, "behavioral profile saved");
                self.submission = Submission::Confirmed(response);
            }
            Err(err) => {
                error!(%err, "behavioral profile not saved");
                self.submission = Submission::Failed(err.user_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiResponse};
    use crate::survey::PAGE_COUNT;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn started() -> ProfileView {
        let mut view = ProfileView::default();
        view.on_key(key(KeyCode::Enter));
        assert_eq!(view.stage, ProfileStage::Questions);
        view
    }

    fn answer_page(view: &mut ProfileView, value: char) {
        for _ in 0..QUESTIONS_PER_PAGE {
            view.on_key(key(KeyCode::Char(value)));
        }
    }

    #[test]
    fn digit_answers_and_moves_down() {
        let mut view = started();
        view.on_key(key(KeyCode::Char('4')));
        assert_eq!(view.survey.answers().get(1), Some(4));
        assert_eq!(view.cursor, 1);

        // cursor stops on the last question of the page
        answer_page(&mut view, '2');
        assert_eq!(view.cursor, QUESTIONS_PER_PAGE - 1);
        assert!(view.survey.is_page_complete());
    }

    #[test]
    fn arrows_step_through_scale() {
        let mut view = started();
        view.on_key(key(KeyCode::Right));
        assert_eq!(view.survey.answers().get(1), Some(1));
        view.on_key(key(KeyCode::Right));
        assert_eq!(view.survey.answers().get(1), Some(2));
        view.on_key(key(KeyCode::Left));
        view.on_key(key(KeyCode::Left));
        assert_eq!(view.survey.answers().get(1), Some(1));

        view.on_key(key(KeyCode::Down));
        view.on_key(key(KeyCode::Left));
        assert_eq!(view.survey.answers().get(2), Some(5));
    }

    #[test]
    fn next_with_unanswered_shows_warning() {
        let mut view = started();
        view.on_key(key(KeyCode::Char('3')));
        view.on_key(key(KeyCode::Char('n')));

        assert_eq!(view.survey.current_step(), 0);
        assert_eq!(
            view.warning.as_deref(),
            Some("Por favor, responda todas as perguntas antes de continuar.")
        );
    }

    #[test]
    fn navigation_resets_cursor_and_warning() {
        let mut view = started();
        view.on_key(key(KeyCode::Tab));
        assert!(view.warning.is_some());

        answer_page(&mut view, '5');
        view.on_key(key(KeyCode::Enter));
        assert_eq!(view.survey.current_step(), 1);
        assert_eq!(view.cursor, 0);
        assert!(view.warning.is_none());

        view.on_key(key(KeyCode::Down));
        view.on_key(key(KeyCode::Char('p')));
        assert_eq!(view.survey.current_step(), 0);
        assert_eq!(view.cursor, 0);
    }

    #[test]
    fn enter_on_last_page_submits() {
        let mut view = started();
        for _ in 0..PAGE_COUNT - 1 {
            answer_page(&mut view, '4');
            view.on_key(key(KeyCode::Enter));
        }
        assert!(view.survey.is_last_step());

        // last page incomplete
        view.on_key(key(KeyCode::Char('1')));
        assert_eq!(view.on_key(key(KeyCode::Enter)), Effect::None);
        assert_eq!(
            view.warning.as_deref(),
            Some("Por favor, responda todas as perguntas antes de finalizar.")
        );

        answer_page(&mut view, '1');
        let effect = view.on_key(key(KeyCode::Enter));
        assert_eq!(view.stage, ProfileStage::Final);
        assert!(view.completed_at.is_some());
        match effect {
            Effect::Submit(SubmissionJob::Profile(submission)) => {
                assert_eq!(submission.answers.len(), 25);
                assert_eq!(Some(submission.scores), view.scores);
            }
            other => panic!("expected profile submission, got {other:?}"),
        }
    }

    #[test]
    fn quit_waits_for_pending_save() {
        let mut view = started();
        for _ in 0..PAGE_COUNT {
            answer_page(&mut view, '4');
            view.on_key(key(KeyCode::Enter));
        }
        assert_eq!(view.stage, ProfileStage::Final);
        assert_eq!(view.submission, Submission::Pending);

        assert_eq!(view.on_key(key(KeyCode::Enter)), Effect::None);
        assert_eq!(view.on_key(key(KeyCode::Char('q'))), Effect::None);

        view.on_submitted(
            Ok(ApiResponse {
                status: "success".into(),
                message: None,
                test_id: None,
                profile_id: Some(4),
            }),
            Instant::now(),
        );
        assert!(view.submission.is_confirmed());
        assert_eq!(view.on_key(key(KeyCode::Char('q'))), Effect::Quit);
    }

    #[test]
    fn failed_save_keeps_final_screen() {
        let mut view = started();
        view.stage = ProfileStage::Final;
        view.on_submitted(
            Err(ApiError::Status {
                status: 400,
                message: "Scores incompletos".into(),
            }),
            Instant::now(),
        );
        assert_eq!(view.stage, ProfileStage::Final);
        assert!(matches!(view.submission, Submission::Failed(_)));
        assert_eq!(view.on_key(key(KeyCode::Enter)), Effect::Quit);
    }
}
