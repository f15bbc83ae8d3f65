pub mod metrics;
pub mod phrases;

use std::time::Instant;

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, info};

use crate::session::PhaseSession;
use crate::util::{mean, std_dev};
use metrics::{calculate_accuracy, calculate_wpm, LiveMetrics};
pub use phrases::{phrase, PHASE_COUNT, PHRASES};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypingError {
    #[error("type something before finishing the phase")]
    EmptyInput,
    #[error("no typing phase is active")]
    NotInPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingStage {
    Welcome,
    Phase(usize),
    Final,
}

/// Outcome of one completed phase.
#[derive(Debug, Clone, PartialEq)]
pub struct TypingResult {
    pub phase_index: usize,
    pub original_phrase: String,
    pub typed_text: String,
    pub elapsed_seconds: f64,
    pub words_per_minute: f64,
    pub accuracy_percent: f64,
}

/// Aggregates over all phases, as stored by the backend alongside the phases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypingSummary {
    pub wpm_average: f64,
    pub accuracy_average: f64,
    pub total_seconds: f64,
    pub wpm_std_dev: f64,
}

/// The typing test wizard: welcome, three phrases, final screen.
#[derive(Debug, Clone)]
pub struct TypingTest {
    stage: TypingStage,
    session: Option<PhaseSession>,
    results: Vec<TypingResult>,
    completed_at: Option<DateTime<Local>>,
}

impl Default for TypingTest {
    fn default() -> Self {
        Self::new()
    }
}

impl TypingTest {
    pub fn new() -> Self {
        Self {
            stage: TypingStage::Welcome,
            session: None,
            results: Vec::with_capacity(PHASE_COUNT),
            completed_at: None,
        }
    }

    pub fn stage(&self) -> TypingStage {
        self.stage
    }

    pub fn session(&self) -> Option<&PhaseSession> {
        self.session.as_ref()
    }

    pub fn results(&self) -> &[TypingResult] {
        &self.results
    }

    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        self.completed_at
    }

    pub fn is_finished(&self) -> bool {
        self.stage == TypingStage::Final
    }

    pub fn start(&mut self) {
        if self.stage == TypingStage::Welcome {
            self.show_phase(0);
        }
    }

    fn show_phase(&mut self, phase_index: usize) {
        let Some(prompt) = phrase(phase_index) else {
            return;
        };
        debug!(phase = phase_index + 1, "typing phase shown");
        self.stage = TypingStage::Phase(phase_index);
        self.session = Some(PhaseSession::new(phase_index, prompt));
    }

    pub fn write(&mut self, c: char) {
        self.write_at(c, Instant::now())
    }

    pub fn write_at(&mut self, c: char, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            session.write(c, now);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.backspace(Instant::now());
        }
    }

    pub fn can_finish(&self) -> bool {
        self.session.as_ref().is_some_and(PhaseSession::can_finish)
    }

    /// Refresh live metrics of an active, started phase.
    pub fn on_tick(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            if session.has_started() {
                session.refresh(now);
            }
        }
    }

    pub fn live_metrics(&self) -> LiveMetrics {
        self.session.as_ref().map(|s| s.live).unwrap_or_default()
    }

    pub fn finish_phase(&mut self) -> Result<TypingStage, TypingError> {
        self.finish_phase_at(Instant::now())
    }

    /// Record the current phase and move to the next one, or to the final
    /// screen after the last phrase.
    pub fn finish_phase_at(&mut self, now: Instant) -> Result<TypingStage, TypingError> {
        let TypingStage::Phase(phase_index) = self.stage else {
            return Err(TypingError::NotInPhase);
        };
        let session = self.session.as_ref().ok_or(TypingError::NotInPhase)?;
        if !session.can_finish() {
            return Err(TypingError::EmptyInput);
        }

        let elapsed_seconds = session.elapsed_secs(now);
        let result = TypingResult {
            phase_index,
            original_phrase: session.prompt.to_string(),
            typed_text: session.input.clone(),
            elapsed_seconds,
            words_per_minute: calculate_wpm(&session.input, elapsed_seconds),
            accuracy_percent: calculate_accuracy(&session.input, session.prompt),
        };
        info!(
            phase = phase_index + 1,
            secs = result.elapsed_seconds,
            wpm = result.words_per_minute,
            accuracy = result.accuracy_percent,
            "typing phase finished"
        );
        self.results.push(result);

        if phase_index + 1 < PHASE_COUNT {
            self.show_phase(phase_index + 1);
        } else {
            self.session = None;
            self.stage = TypingStage::Final;
            self.completed_at = Some(Local::now());
        }
        Ok(self.stage)
    }

    /// Averages over the recorded phases; `None` until the test is finished.
    pub fn summary(&self) -> Option<TypingSummary> {
        if !self.is_finished() {
            return None;
        }
        let wpms: Vec<f64> = self.results.iter().map(|r| r.words_per_minute).collect();
        let accuracies: Vec<f64> = self.results.iter().map(|r| r.accuracy_percent).collect();

        Some(TypingSummary {
            wpm_average: mean(&wpms)?,
            accuracy_average: mean(&accuracies)?,
            total_seconds: self.results.iter().map(|r| r.elapsed_seconds).sum(),
            wpm_std_dev: std_dev(&wpms)?,
        })
    }
}
