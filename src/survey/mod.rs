pub mod questions;
pub mod scoring;

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info};

pub use questions::{Quadrant, Question, QUESTIONS};
pub use scoring::{calculate_scores, QuadrantScores};

use questions::{question, MAX_ANSWER, MIN_ANSWER};

pub const QUESTIONS_PER_PAGE: usize = 5;
pub const PAGE_COUNT: usize = QUESTIONS.len() / QUESTIONS_PER_PAGE;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    #[error("Por favor, responda todas as perguntas antes de continuar.")]
    IncompletePage { unanswered: Vec<u32> },
    #[error("Por favor, responda todas as perguntas antes de finalizar.")]
    IncompleteSurvey { unanswered: Vec<u32> },
    #[error("question {0} does not exist")]
    UnknownQuestion(u32),
    #[error("answer {0} is outside the 1-5 scale")]
    InvalidAnswer(u8),
}

/// Answer per question id; `None` until the question is answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(BTreeMap<u32, Option<u8>>);

impl Answers {
    pub fn for_questions(questions: &[Question]) -> Self {
        Self(questions.iter().map(|q| (q.id, None)).collect())
    }

    pub fn get(&self, question_id: u32) -> Option<u8> {
        self.0.get(&question_id).copied().flatten()
    }

    pub fn set(&mut self, question_id: u32, value: u8) {
        self.0.insert(question_id, Some(value));
    }

    pub fn is_answered(&self, question_id: u32) -> bool {
        self.get(question_id).is_some()
    }

    pub fn answered_count(&self) -> usize {
        self.0.values().filter(|v| v.is_some()).count()
    }
}

/// One line of the submitted answer sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_id: u32,
    pub quadrant: Quadrant,
    pub answer: u8,
}

/// Everything sent to the backend once the survey is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSubmission {
    pub answers: Vec<AnswerRecord>,
    pub scores: QuadrantScores,
}

/// Paged questionnaire state: the answers and the page being shown.
#[derive(Debug, Clone)]
pub struct Survey {
    questions: &'static [Question],
    answers: Answers,
    current_step: usize,
}

impl Default for Survey {
    fn default() -> Self {
        Self::new()
    }
}

impl Survey {
    pub fn new() -> Self {
        Self {
            questions: &QUESTIONS,
            answers: Answers::for_questions(&QUESTIONS),
            current_step: 0,
        }
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 == PAGE_COUNT
    }

    pub fn progress_percent(&self) -> u8 {
        (((self.current_step + 1) as f64 / PAGE_COUNT as f64) * 100.0).round() as u8
    }

    pub fn page_questions(&self) -> &'static [Question] {
        let start = self.current_step * QUESTIONS_PER_PAGE;
        let end = (start + QUESTIONS_PER_PAGE).min(self.questions.len());
        &self.questions[start..end]
    }

    pub fn set_answer(&mut self, question_id: u32, value: u8) -> Result<(), SurveyError> {
        if !(MIN_ANSWER..=MAX_ANSWER).contains(&value) {
            return Err(SurveyError::InvalidAnswer(value));
        }
        if question(question_id).is_none() {
            return Err(SurveyError::UnknownQuestion(question_id));
        }
        self.answers.set(question_id, value);
        Ok(())
    }

    fn unanswered(&self, questions: &[Question]) -> Vec<u32> {
        questions
            .iter()
            .filter(|q| !self.answers.is_answered(q.id))
            .map(|q| q.id)
            .collect()
    }

    pub fn is_page_complete(&self) -> bool {
        self.unanswered(self.page_questions()).is_empty()
    }

    /// Advance one page. Refused while the current page has unanswered
    /// questions; a no-op on the last page.
    pub fn next_step(&mut self) -> Result<usize, SurveyError> {
        let unanswered = self.unanswered(self.page_questions());
        if !unanswered.is_empty() {
            debug!(step = self.current_step, ?unanswered, "next step blocked");
            return Err(SurveyError::IncompletePage { unanswered });
        }
        if !self.is_last_step() {
            self.current_step += 1;
        }
        Ok(self.current_step)
    }

    /// Go back one page; returns whether the page changed.
    pub fn previous_step(&mut self) -> bool {
        if self.current_step > 0 {
            self.current_step -= 1;
            true
        } else {
            false
        }
    }

    pub fn calculate_scores(&self) -> QuadrantScores {
        calculate_scores(self.questions, &self.answers)
    }

    /// Validate that every question is answered and build the submission.
    pub fn submit(&self) -> Result<ProfileSubmission, SurveyError> {
        let unanswered = self.unanswered(self.questions);
        if !unanswered.is_empty() {
            return Err(SurveyError::IncompleteSurvey { unanswered });
        }

        let answers = self
            .questions
            .iter()
            .filter_map(|q| {
                self.answers.get(q.id).map(|answer| AnswerRecord {
                    question_id: q.id,
                    quadrant: q.quadrant,
                    answer,
                })
            })
            .collect();
        let scores = self.calculate_scores();
        info!(
            a = scores.a,
            b = scores.b,
            c = scores.c,
            d = scores.d,
            dominant = %scores.dominant,
            "behavioral profile scored"
        );

        Ok(ProfileSubmission { answers, scores })
    }
}
