//! JSON question bank loader.
//!
//! Loads question banks from JSON files, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::QuestionBank;
use crate::normalize::normalize;

/// Parse a question bank file.
pub fn load_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_question_bank_str(&content, path)
}

/// Parse a JSON string into a `QuestionBank` (useful for testing).
pub fn parse_question_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let bank: QuestionBank = serde_json::from_str(content)
        .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;
    tracing::info!(
        "loaded {} question(s) from {}",
        bank.len(),
        source_path.display()
    );
    Ok(bank)
}

/// Load a question bank, treating an unreadable or invalid file as an empty
/// bank.
pub fn load_question_bank_or_empty(path: &Path) -> QuestionBank {
    match load_question_bank(path) {
        Ok(bank) => bank,
        Err(e) => {
            tracing::warn!("no questions available: {e:#}");
            QuestionBank::default()
        }
    }
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for common issues.
pub fn validate_question_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for q in &bank.questions {
        if !seen_ids.insert(q.id.as_str()) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id.clone()),
                message: format!("duplicate question ID: {}", q.id),
            });
        }
    }

    for q in &bank.questions {
        let warn = |message: String| ValidationWarning {
            question_id: Some(q.id.clone()),
            message,
        };

        if q.question.trim().is_empty() {
            warnings.push(warn("question text is empty".into()));
        }
        if q.expected_answer.trim().is_empty() {
            warnings.push(warn("expected answer is empty".into()));
        }
        if q.key_points.is_empty() {
            warnings.push(warn(
                "no key points, answers are scored on length only".into(),
            ));
        }
        for kp in &q.key_points {
            if normalize(kp).is_empty() {
                warnings.push(warn(format!("key point {kp:?} can never match")));
            }
        }
    }

    warnings
}
