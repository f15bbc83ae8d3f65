/// Characters counted as one word when computing WPM.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Snapshot of the numbers shown while a phase is being typed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiveMetrics {
    pub elapsed_secs: f64,
    pub wpm: f64,
    pub accuracy: f64,
}

impl LiveMetrics {
    pub fn measure(typed: &str, original: &str, elapsed_secs: f64) -> Self {
        Self {
            elapsed_secs,
            wpm: calculate_wpm(typed, elapsed_secs),
            accuracy: calculate_accuracy(typed, original),
        }
    }
}

/// Percentage of `original` matched by `typed`, compared position by position.
///
/// Only indices below the shorter length are compared, so an inserted or
/// dropped character shifts every following position. An empty `original`
/// yields 0.
pub fn calculate_accuracy(typed: &str, original: &str) -> f64 {
    let original_len = original.chars().count();
    if original_len == 0 {
        return 0.0;
    }

    let correct = typed
        .chars()
        .zip(original.chars())
        .filter(|(t, o)| t == o)
        .count();

    (correct as f64 / original_len as f64) * 100.0
}

/// Words per minute, where a word is five characters of `typed`.
pub fn calculate_wpm(typed: &str, seconds: f64) -> f64 {
    if seconds.is_nan() || seconds <= 0.0 {
        return 0.0;
    }

    let words = typed.chars().count() as f64 / CHARS_PER_WORD;
    words / (seconds / 60.0)
}
