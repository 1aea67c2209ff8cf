//! Deterministic key-point scoring.
//!
//! This is the terminal fallback of the scoring pipeline: a pure function of
//! the answer and the question that always produces a result.

use async_trait::async_trait;

use crate::matcher::is_present;
use crate::model::{Question, ScoringResult, Source};
use crate::normalize::normalize;
use crate::traits::{Outcome, ScoringStrategy};

/// An answer to a question without key points must be strictly longer than
/// this many characters (after trimming) to score 100.
pub const MIN_FREEFORM_ANSWER_CHARS: usize = 10;

/// Score an answer by checking each key point of the question.
pub fn score_locally(user_answer: &str, question: &Question) -> ScoringResult {
    if question.key_points.is_empty() {
        let length = user_answer.trim().chars().count();
        let score = if length > MIN_FREEFORM_ANSWER_CHARS { 100 } else { 0 };
        return ScoringResult::new(score, Vec::new(), Vec::new(), Source::Keywords);
    }

    let answer = normalize(user_answer);
    let (found, missing): (Vec<String>, Vec<String>) = question
        .key_points
        .iter()
        .cloned()
        .partition(|kp| is_present(kp, &answer));

    let score = coverage_score(found.len(), question.key_points.len());
    ScoringResult::new(score, found, missing, Source::Keywords)
}

/// `round(100 * found / total)`, rounding halves up. `total` must be non-zero.
fn coverage_score(found: usize, total: usize) -> u8 {
    let rounded = (200 * found + total) / (2 * total);
    rounded.min(100) as u8
}

/// [`score_locally`] as a scoring strategy. Never unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalScorer;

#[async_trait]
impl ScoringStrategy for LocalScorer {
    fn name(&self) -> &str {
        "keywords"
    }

    async fn attempt(&self, user_answer: &str, question: &Question) -> Outcome {
        Outcome::Scored(score_locally(user_answer, question))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    fn question(key_points: &[&str]) -> Question {
        Question {
            id: "q1".into(),
            category: "interieur".into(),
            question: "Que vérifiez-vous avant de partir ?".into(),
            expected_answer: "Freins, direction, pneus, essuie-glaces.".into(),
            key_points: key_points.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn half_the_key_points_is_partial() {
        let q = question(&["freins", "direction", "pneus", "essuie-glaces"]);
        let result = score_locally("Je teste les freins puis la direction.", &q);
        assert_eq!(result.found, vec!["freins", "direction"]);
        assert_eq!(result.missing, vec!["pneus", "essuie-glaces"]);
        assert_eq!(result.score, 50);
        assert_eq!(result.status, Status::Partial);
        assert_eq!(result.source, Source::Keywords);
    }

    #[test]
    fn partition_preserves_order() {
        let q = question(&["pneus", "freins", "feux", "direction", "klaxon"]);
        let result = score_locally("direction, klaxon et pneus", &q);
        assert_eq!(result.found, vec!["pneus", "direction", "klaxon"]);
        assert_eq!(result.missing, vec!["freins", "feux"]);
        assert_eq!(result.found.len() + result.missing.len(), q.key_points.len());
        assert_eq!(result.score, 60);
    }

    #[test]
    fn all_key_points_is_success() {
        let q = question(&["Freins", "Direction"]);
        let result = score_locally("FREINS ok, DIRECTION ok", &q);
        assert_eq!(result.score, 100);
        assert_eq!(result.status, Status::Success);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn empty_answer_scores_zero() {
        let q = question(&["freins"]);
        let result = score_locally("", &q);
        assert_eq!(result.score, 0);
        assert_eq!(result.status, Status::Error);
        assert_eq!(result.missing, vec!["freins"]);
    }

    #[test]
    fn no_key_points_long_answer() {
        let q = question(&[]);
        let result = score_locally("Je vérifie l'état général du véhicule.", &q);
        assert_eq!(result.score, 100);
        assert_eq!(result.status, Status::Success);
        assert!(result.found.is_empty());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn no_key_points_short_answer() {
        let q = question(&[]);
        let result = score_locally("ok", &q);
        assert_eq!(result.score, 0);
        assert_eq!(result.status, Status::Error);
    }

    #[test]
    fn no_key_points_length_threshold_is_strict() {
        let q = question(&[]);
        assert_eq!(score_locally("  abcdefghij  ", &q).score, 0);
        assert_eq!(score_locally("abcdefghijk", &q).score, 100);
        // Characters, not bytes.
        assert_eq!(score_locally("éééééééééé", &q).score, 0);
    }

    #[test]
    fn coverage_rounds_half_up() {
        assert_eq!(coverage_score(1, 8), 13);
        assert_eq!(coverage_score(1, 3), 33);
        assert_eq!(coverage_score(2, 3), 67);
        assert_eq!(coverage_score(0, 5), 0);
        assert_eq!(coverage_score(5, 5), 100);
    }

    #[tokio::test]
    async fn strategy_always_scores() {
        let q = question(&["freins"]);
        match LocalScorer.attempt("freins", &q).await {
            Outcome::Scored(result) => assert_eq!(result.score, 100),
            Outcome::Unavailable(reason) => panic!("local scorer unavailable: {reason}"),
        }
    }
}
