//! Central scoring orchestrator.
//!
//! Tries an ordered list of scoring strategies (typically a remote oracle)
//! and falls back to local key-point scoring when none of them produces a
//! result. This is the only entry point the front ends talk to.

use std::sync::Arc;
use std::time::Duration;

use crate::local::score_locally;
use crate::model::{Question, ScoringResult};
use crate::remote::RemoteScorer;
use crate::traits::{Outcome, ScoringOracle, ScoringStrategy};

/// Configuration for the scoring engine.
#[derive(Debug, Clone)]
pub struct ScoringEngineConfig {
    /// Upper bound on a single strategy attempt. `None` relies on the
    /// strategy's own transport timeout.
    pub attempt_timeout: Option<Duration>,
}

impl Default for ScoringEngineConfig {
    fn default() -> Self {
        Self {
            attempt_timeout: Some(Duration::from_secs(20)),
        }
    }
}

/// The scoring engine.
///
/// Holds no per-submission state; concurrent calls to [`ScoringEngine::score`]
/// are independent.
pub struct ScoringEngine {
    strategies: Vec<Arc<dyn ScoringStrategy>>,
    config: ScoringEngineConfig,
}

impl ScoringEngine {
    pub fn new(strategies: Vec<Arc<dyn ScoringStrategy>>, config: ScoringEngineConfig) -> Self {
        Self { strategies, config }
    }

    /// An engine that only ever scores locally.
    pub fn local_only() -> Self {
        Self::new(Vec::new(), ScoringEngineConfig::default())
    }

    /// An engine that consults `oracle` first.
    pub fn with_oracle(oracle: Arc<dyn ScoringOracle>, config: ScoringEngineConfig) -> Self {
        let remote: Arc<dyn ScoringStrategy> = Arc::new(RemoteScorer::new(oracle));
        Self::new(vec![remote], config)
    }

    /// Names of the strategies tried before the local fallback.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Score an answer. Always returns a result.
    pub async fn score(&self, user_answer: &str, question: &Question) -> ScoringResult {
        for strategy in &self.strategies {
            match self.attempt(strategy.as_ref(), user_answer, question).await {
                Outcome::Scored(result) => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        question = %question.id,
                        score = result.score,
                        "scored"
                    );
                    return result;
                }
                Outcome::Unavailable(reason) => {
                    tracing::warn!(
                        strategy = strategy.name(),
                        question = %question.id,
                        "scorer unavailable, falling back: {reason}"
                    );
                }
            }
        }

        score_locally(user_answer, question)
    }

    async fn attempt(
        &self,
        strategy: &dyn ScoringStrategy,
        user_answer: &str,
        question: &Question,
    ) -> Outcome {
        match self.config.attempt_timeout {
            Some(limit) => tokio::time::timeout(limit, strategy.attempt(user_answer, question))
                .await
                .unwrap_or_else(|_| {
                    Outcome::Unavailable(format!("timed out after {}ms", limit.as_millis()))
                }),
            None => strategy.attempt(user_answer, question).await,
        }
    }
}
