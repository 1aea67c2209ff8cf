//! Core trait definitions for scoring oracles and scoring strategies.
//!
//! `ScoringOracle` is implemented by the backends in `permis-oracle`;
//! `ScoringStrategy` is what the scoring engine chains together.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::model::{Question, ScoringResult};

// ---------------------------------------------------------------------------
// Scoring oracle trait
// ---------------------------------------------------------------------------

/// An external, possibly unavailable service that scores answers.
///
/// Implementations return the raw JSON payload they received; validating and
/// coercing it into a [`ScoringResult`] is left to
/// [`RemoteScorer`](crate::remote::RemoteScorer), since the payload cannot be
/// trusted to follow the contract.
#[async_trait]
pub trait ScoringOracle: Send + Sync {
    /// Human-readable oracle name (e.g. "http").
    fn name(&self) -> &str;

    /// Ask the oracle to score an answer.
    async fn consult(&self, request: &OracleRequest) -> Result<serde_json::Value, OracleError>;
}

/// Body sent to a scoring oracle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleRequest {
    /// The question text.
    pub question: String,
    /// The reference answer.
    pub expected_answer: String,
    /// What the learner typed.
    pub user_answer: String,
}

impl OracleRequest {
    pub fn new(user_answer: &str, question: &Question) -> Self {
        Self {
            question: question.question.clone(),
            expected_answer: question.expected_answer.clone(),
            user_answer: user_answer.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring strategy trait
// ---------------------------------------------------------------------------

/// Result of one scoring attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The strategy produced a usable result.
    Scored(ScoringResult),
    /// The strategy could not score this answer; try the next one.
    Unavailable(String),
}

impl Outcome {
    pub fn is_scored(&self) -> bool {
        matches!(self, Outcome::Scored(_))
    }
}

/// One way of scoring an answer, tried in order by the scoring engine.
#[async_trait]
pub trait ScoringStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Try to score `user_answer` against `question`.
    async fn attempt(&self, user_answer: &str, question: &Question) -> Outcome;
}
