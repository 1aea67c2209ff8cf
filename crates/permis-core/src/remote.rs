//! Remote scoring adapter.
//!
//! Wraps a [`ScoringOracle`] as a [`ScoringStrategy`]: consults the oracle,
//! and coerces whatever object it sends back into a well-typed
//! [`ScoringResult`]. Transport failures, error statuses and non-object
//! bodies all become [`Outcome::Unavailable`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use crate::model::{Question, ScoringResult, Source, Status};
use crate::traits::{OracleRequest, Outcome, ScoringOracle, ScoringStrategy};

/// Scoring strategy backed by a remote oracle.
pub struct RemoteScorer {
    oracle: Arc<dyn ScoringOracle>,
}

impl RemoteScorer {
    pub fn new(oracle: Arc<dyn ScoringOracle>) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl ScoringStrategy for RemoteScorer {
    fn name(&self) -> &str {
        self.oracle.name()
    }

    #[instrument(skip_all, fields(oracle = %self.oracle.name(), question = %question.id))]
    async fn attempt(&self, user_answer: &str, question: &Question) -> Outcome {
        let request = OracleRequest::new(user_answer, question);

        let payload = match self.oracle.consult(&request).await {
            Ok(payload) => payload,
            Err(e) => return Outcome::Unavailable(e.to_string()),
        };

        match coerce_payload(&payload) {
            Some(result) => Outcome::Scored(result),
            None => Outcome::Unavailable(format!(
                "oracle payload is not an object: {}",
                truncate(&payload.to_string(), 120)
            )),
        }
    }
}

/// Coerce an oracle payload into a [`ScoringResult`].
///
/// Returns `None` unless the payload is a JSON object. Each field is read on
/// its own: a non-numeric `score` becomes 0, non-array `found`/`missing`
/// become empty, non-string entries are dropped. The status is recomputed
/// from the score so it follows the same thresholds as local scoring.
pub fn coerce_payload(payload: &Value) -> Option<ScoringResult> {
    let object = payload.as_object()?;

    let score = object
        .get("score")
        .and_then(Value::as_f64)
        .filter(|s| s.is_finite())
        .map(|s| s.round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0);

    let claimed = object
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Status>().ok())
        .unwrap_or(Status::Error);

    let result = ScoringResult::new(
        score,
        string_list(object.get("found")),
        string_list(object.get("missing")),
        Source::Oracle,
    )
    .with_feedback(
        object
            .get("feedback")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
    );

    if claimed != result.status {
        tracing::debug!(
            claimed = %claimed,
            derived = %result.status,
            score,
            "oracle status disagrees with its score, using score"
        );
    }

    Some(result)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OracleError;
    use serde_json::json;

    struct FixedOracle(Result<Value, fn() -> OracleError>);

    #[async_trait]
    impl ScoringOracle for FixedOracle {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn consult(&self, _: &OracleRequest) -> Result<Value, OracleError> {
            match &self.0 {
                Ok(v) => Ok(v.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    fn question() -> Question {
        Question {
            id: "3".into(),
            category: "exterieur".into(),
            question: "Vérifiez l'état des pneumatiques.".into(),
            expected_answer: "Usure, pression, absence de hernie.".into(),
            key_points: vec!["usure".into(), "pression".into()],
        }
    }

    #[test]
    fn well_formed_payload() {
        let payload = json!({
            "status": "partial",
            "score": 55,
            "found": ["usure"],
            "missing": ["pression"],
            "feedback": "Pensez à la pression."
        });
        let result = coerce_payload(&payload).unwrap();
        assert_eq!(result.score, 55);
        assert_eq!(result.status, Status::Partial);
        assert_eq!(result.found, vec!["usure"]);
        assert_eq!(result.missing, vec!["pression"]);
        assert_eq!(result.source, Source::Oracle);
        assert_eq!(result.feedback.as_deref(), Some("Pensez à la pression."));
    }

    #[test]
    fn empty_object_defaults() {
        let result = coerce_payload(&json!({})).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.status, Status::Error);
        assert!(result.found.is_empty());
        assert!(result.missing.is_empty());
        assert!(result.feedback.is_none());
    }

    #[test]
    fn wrong_field_types_are_coerced() {
        let payload = json!({
            "status": 3,
            "score": "90",
            "found": "usure",
            "missing": ["pression", 4, null],
            "feedback": 12
        });
        let result = coerce_payload(&payload).unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.status, Status::Error);
        assert!(result.found.is_empty());
        assert_eq!(result.missing, vec!["pression"]);
        assert!(result.feedback.is_none());
    }

    #[test]
    fn score_is_rounded_and_clamped() {
        assert_eq!(coerce_payload(&json!({"score": 69.5})).unwrap().score, 70);
        assert_eq!(coerce_payload(&json!({"score": 140})).unwrap().score, 100);
        assert_eq!(coerce_payload(&json!({"score": -5})).unwrap().score, 0);
    }

    #[test]
    fn status_follows_score() {
        let result = coerce_payload(&json!({"status": "success", "score": 20})).unwrap();
        assert_eq!(result.status, Status::Error);
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(coerce_payload(&json!([1, 2])).is_none());
        assert!(coerce_payload(&json!("success")).is_none());
        assert!(coerce_payload(&Value::Null).is_none());
    }

    #[tokio::test]
    async fn oracle_error_is_unavailable() {
        let scorer = RemoteScorer::new(Arc::new(FixedOracle(Err(|| {
            OracleError::NetworkError("connection refused".into())
        }))));
        match scorer.attempt("usure", &question()).await {
            Outcome::Unavailable(reason) => assert!(reason.contains("connection refused")),
            Outcome::Scored(_) => panic!("expected unavailable"),
        }
    }

    #[tokio::test]
    async fn non_object_body_is_unavailable() {
        let scorer = RemoteScorer::new(Arc::new(FixedOracle(Ok(json!("ok")))));
        assert!(!scorer.attempt("usure", &question()).await.is_scored());
    }

    #[tokio::test]
    async fn object_body_is_scored() {
        let scorer = RemoteScorer::new(Arc::new(FixedOracle(Ok(json!({"score": 80})))));
        match scorer.attempt("usure", &question()).await {
            Outcome::Scored(result) => {
                assert_eq!(result.score, 80);
                assert_eq!(result.source, Source::Oracle);
            }
            Outcome::Unavailable(reason) => panic!("unexpected: {reason}"),
        }
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("ééé", 2), "éé...");
        assert_eq!(truncate("abc", 5), "abc");
    }
}
