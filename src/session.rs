use std::time::Instant;

use crate::typing::metrics::LiveMetrics;

/// Input state for a single typing phase.
///
/// A fresh session is created for every phase, which clears the input, the
/// start instant and the live metrics in one go.
#[derive(Debug, Clone)]
pub struct PhaseSession {
    pub phase_index: usize,
    pub prompt: &'static str,
    pub input: String,
    pub started_at: Option<Instant>,
    pub live: LiveMetrics,
}

impl PhaseSession {
    pub fn new(phase_index: usize, prompt: &'static str) -> Self {
        Self {
            phase_index,
            prompt,
            input: String::new(),
            started_at: None,
            live: LiveMetrics::default(),
        }
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Append a character, starting the clock on the first keystroke.
    pub fn write(&mut self, c: char, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.input.push(c);
        self.refresh(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.input.pop().is_some() {
            self.refresh(now);
        }
    }

    /// Whitespace alone does not count as an answer.
    pub fn can_finish(&self) -> bool {
        !self.input.trim().is_empty()
    }

    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        self.started_at
            .map(|start| now.saturating_duration_since(start).as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Recompute live metrics. Before the first keystroke everything reads zero.
    pub fn refresh(&mut self, now: Instant) {
        self.live = if self.has_started() {
            LiveMetrics::measure(&self.input, self.prompt, self.elapsed_secs(now))
        } else {
            LiveMetrics::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_session_is_idle() {
        let session = PhaseSession::new(0, "abc");
        assert!(!session.has_started());
        assert!(!session.can_finish());
        assert_eq!(session.live, LiveMetrics::default());
        assert_eq!(session.elapsed_secs(Instant::now()), 0.0);
    }

    #[test]
    fn test_first_keystroke_starts_clock() {
        let mut session = PhaseSession::new(0, "abc");
        let now = Instant::now();
        session.write('a', now);
        assert_eq!(session.started_at, Some(now));

        session.write('b', now + Duration::from_secs(1));
        assert_eq!(session.started_at, Some(now));
        assert_eq!(session.input, "ab");
    }

    #[test]
    fn test_whitespace_cannot_finish() {
        let mut session = PhaseSession::new(0, "abc");
        let now = Instant::now();
        session.write(' ', now);
        session.write(' ', now);
        assert!(!session.can_finish());
        session.write('a', now);
        assert!(session.can_finish());
    }

    #[test]
    fn test_backspace_keeps_clock_running() {
        let mut session = PhaseSession::new(0, "abc");
        let now = Instant::now();
        session.write('a', now);
        session.backspace(now);
        session.backspace(now);
        assert!(session.input.is_empty());
        assert!(session.has_started());
    }

    #[test]
    fn test_refresh_uses_elapsed_time() {
        let mut session = PhaseSession::new(0, "aaaaa");
        let start = Instant::now();
        for _ in 0..5 {
            session.write('a', start);
        }
        session.refresh(start + Duration::from_secs(60));
        assert_eq!(session.live.elapsed_secs, 60.0);
        assert_eq!(session.live.wpm, 1.0);
        assert_eq!(session.live.accuracy, 100.0);
    }
}
