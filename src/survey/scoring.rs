use serde::Serialize;

use super::questions::{count_in_quadrant, Quadrant, Question, MAX_ANSWER};
use super::Answers;

/// Normalized 0..=100 score per quadrant plus the highest-scoring quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuadrantScores {
    #[serde(rename = "A")]
    pub a: u8,
    #[serde(rename = "B")]
    pub b: u8,
    #[serde(rename = "C")]
    pub c: u8,
    #[serde(rename = "D")]
    pub d: u8,
    pub dominant: Quadrant,
}

impl QuadrantScores {
    pub fn get(&self, quadrant: Quadrant) -> u8 {
        match quadrant {
            Quadrant::A => self.a,
            Quadrant::B => self.b,
            Quadrant::C => self.c,
            Quadrant::D => self.d,
        }
    }
}

/// Sum the answers of each quadrant and normalize against the maximum
/// attainable (`questions_in_quadrant * 5`).
///
/// Unanswered questions contribute nothing. On a tie the quadrant that comes
/// first in `Quadrant::ALL` is dominant.
pub fn calculate_scores(questions: &[Question], answers: &Answers) -> QuadrantScores {
    let score = |quadrant: Quadrant| -> u8 {
        let max_score = count_in_quadrant(questions, quadrant) * MAX_ANSWER as usize;
        if max_score == 0 {
            return 0;
        }
        let sum: u32 = questions
            .iter()
            .filter(|q| q.quadrant == quadrant)
            .filter_map(|q| answers.get(q.id))
            .map(u32::from)
            .sum();
        ((sum as f64 / max_score as f64) * 100.0).round() as u8
    };

    let [a, b, c, d] = Quadrant::ALL.map(score);
    let mut scores = QuadrantScores {
        a,
        b,
        c,
        d,
        dominant: Quadrant::A,
    };
    scores.dominant = Quadrant::ALL
        .into_iter()
        .fold(Quadrant::A, |best, q| {
            if scores.get(q) > scores.get(best) {
                q
            } else {
                best
            }
        });
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::questions::QUESTIONS;

    fn answered(f: impl Fn(&Question) -> u8) -> Answers {
        let mut answers = Answers::for_questions(&QUESTIONS);
        for q in &QUESTIONS {
            answers.set(q.id, f(q));
        }
        answers
    }

    #[test]
    fn test_all_max_answers() {
        let scores = calculate_scores(&QUESTIONS, &answered(|_| 5));
        assert_eq!((scores.a, scores.b, scores.c, scores.d), (100, 100, 100, 100));
        // full tie goes to the first quadrant
        assert_eq!(scores.dominant, Quadrant::A);
    }

    #[test]
    fn test_all_min_answers() {
        let scores = calculate_scores(&QUESTIONS, &answered(|_| 1));
        assert_eq!((scores.a, scores.b, scores.c, scores.d), (20, 20, 20, 20));
    }

    #[test]
    fn test_normalizes_by_quadrant_size() {
        // A has 7 questions: 7 * 4 = 28 of 35 -> 80
        // B has 6 questions: 6 * 3 = 18 of 30 -> 60
        let scores = calculate_scores(
            &QUESTIONS,
            &answered(|q| match q.quadrant {
                Quadrant::A => 4,
                Quadrant::B => 3,
                Quadrant::C => 2,
                Quadrant::D => 5,
            }),
        );
        assert_eq!(scores.a, 80);
        assert_eq!(scores.b, 60);
        assert_eq!(scores.c, 40);
        assert_eq!(scores.d, 100);
        assert_eq!(scores.dominant, Quadrant::D);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // B: 5+5+5+5+5+4 = 29 of 30 -> 96.67 -> 97
        let scores = calculate_scores(
            &QUESTIONS,
            &answered(|q| if q.id == 22 { 4 } else { 5 }),
        );
        assert_eq!(scores.b, 97);
        assert_eq!(scores.a, 100);
        assert_eq!(scores.dominant, Quadrant::A);
    }

    #[test]
    fn test_tie_between_later_quadrants() {
        let scores = calculate_scores(
            &QUESTIONS,
            &answered(|q| match q.quadrant {
                Quadrant::C | Quadrant::D => 5,
                _ => 2,
            }),
        );
        assert_eq!(scores.c, scores.d);
        assert_eq!(scores.dominant, Quadrant::C);
    }

    #[test]
    fn test_scores_in_range_and_dominant_is_max() {
        for seed in 0..50u32 {
            let answers = answered(|q| ((q.id * 7 + seed * 13) % 5 + 1) as u8);
            let scores = calculate_scores(&QUESTIONS, &answers);
            let best = scores.get(scores.dominant);
            for quadrant in Quadrant::ALL {
                assert!(scores.get(quadrant) <= 100);
                assert!(best >= scores.get(quadrant));
            }
        }
    }

    #[test]
    fn test_unanswered_questions_count_as_zero() {
        let answers = Answers::for_questions(&QUESTIONS);
        let scores = calculate_scores(&QUESTIONS, &answers);
        assert_eq!((scores.a, scores.b, scores.c, scores.d), (0, 0, 0, 0));
    }

    #[test]
    fn test_serializes_with_quadrant_keys() {
        let scores = calculate_scores(&QUESTIONS, &answered(|_| 3));
        let json = serde_json::to_value(scores).unwrap();
        assert_eq!(json["A"], 60);
        assert_eq!(json["D"], 60);
        assert_eq!(json["dominant"], "A");
    }
}
