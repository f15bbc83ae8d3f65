//! JSON bodies exchanged with the screening backend.

use serde::{Deserialize, Serialize};

use crate::survey::{AnswerRecord, ProfileSubmission, Quadrant, QuadrantScores};
use crate::typing::TypingResult;
use crate::util::one_decimal;

/// One phase of the typing test. Metrics travel as one-decimal strings and
/// the phase number is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPhasePayload<'a> {
    pub phase: usize,
    pub original_phrase: &'a str,
    pub typed_text: &'a str,
    pub time_seconds: String,
    pub wpm: String,
    pub accuracy: String,
}

impl<'a> From<&'a TypingResult> for TypingPhasePayload<'a> {
    fn from(result: &'a TypingResult) -> Self {
        Self {
            phase: result.phase_index + 1,
            original_phrase: &result.original_phrase,
            typed_text: &result.typed_text,
            time_seconds: one_decimal(result.elapsed_seconds),
            wpm: one_decimal(result.words_per_minute),
            accuracy: one_decimal(result.accuracy_percent),
        }
    }
}

pub fn typing_payload(results: &[TypingResult]) -> Vec<TypingPhasePayload<'_>> {
    results.iter().map(TypingPhasePayload::from).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerPayload {
    pub question_id: u32,
    pub quadrant: Quadrant,
    pub answer: u8,
}

impl From<&AnswerRecord> for AnswerPayload {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            question_id: record.question_id,
            quadrant: record.quadrant,
            answer: record.answer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilePayload {
    pub answers: Vec<AnswerPayload>,
    pub scores: QuadrantScores,
}

impl From<&ProfileSubmission> for ProfilePayload {
    fn from(submission: &ProfileSubmission) -> Self {
        Self {
            answers: submission.answers.iter().map(AnswerPayload::from).collect(),
            scores: submission.scores,
        }
    }
}

/// Reply of both save endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub test_id: Option<i64>,
    #[serde(default)]
    pub profile_id: Option<i64>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
