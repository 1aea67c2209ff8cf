//! Core data model types for permis.
//!
//! These are the fundamental types the scoring pipeline works with: the
//! questions of the bank, and the unified result every scorer produces.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// A single exam question with its reference answer and key points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Identifier, unique within a bank. Numeric ids are read as strings.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Category the question belongs to (e.g. "interieur", "exterieur").
    #[serde(default)]
    pub category: String,
    /// The question shown to the learner.
    pub question: String,
    /// Reference answer, shown after submission.
    #[serde(default)]
    pub expected_answer: String,
    /// Concepts the answer should cover, in display order.
    #[serde(default)]
    pub key_points: Vec<String>,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// The loaded question bank. Read-only once loaded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionBank {
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a question by id.
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.questions
            .iter()
            .map(|q| q.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Questions matching the filter, in bank order.
    pub fn by_category<'a>(
        &'a self,
        filter: &'a CategoryFilter,
    ) -> impl Iterator<Item = &'a Question> {
        self.questions.iter().filter(move |q| filter.matches(q))
    }
}

/// Which part of the bank is being practised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &question.category == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "all"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("empty category".to_string());
        }
        if trimmed.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(trimmed.to_string()))
        }
    }
}

/// Coarse verdict derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Partial,
    Error,
}

impl Status {
    /// Lowest score that counts as a success.
    pub const SUCCESS_THRESHOLD: u8 = 70;
    /// Lowest score that counts as a partial answer.
    pub const PARTIAL_THRESHOLD: u8 = 40;

    /// Map a score to its status. Applies to every scorer alike.
    pub fn from_score(score: u8) -> Self {
        if score >= Self::SUCCESS_THRESHOLD {
            Status::Success
        } else if score >= Self::PARTIAL_THRESHOLD {
            Status::Partial
        } else {
            Status::Error
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Success => write!(f, "success"),
            Status::Partial => write!(f, "partial"),
            Status::Error => write!(f, "error"),
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(Status::Success),
            "partial" => Ok(Status::Partial),
            "error" => Ok(Status::Error),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// Which scorer produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The deterministic local key-point matcher.
    Keywords,
    /// The remote scoring oracle.
    Oracle,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Keywords => write!(f, "keywords"),
            Source::Oracle => write!(f, "oracle"),
        }
    }
}

/// The unified outcome of scoring one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Score in `0..=100`.
    pub score: u8,
    /// Verdict, always `Status::from_score(score)`.
    pub status: Status,
    /// Key points judged present.
    pub found: Vec<String>,
    /// Key points judged absent.
    pub missing: Vec<String>,
    /// Scorer that produced this result.
    pub source: Source,
    /// Free-text comment from the oracle, if it gave one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl ScoringResult {
    /// Build a result whose status follows from the score.
    pub fn new(score: u8, found: Vec<String>, missing: Vec<String>, source: Source) -> Self {
        let score = score.min(100);
        Self {
            score,
            status: Status::from_score(score),
            found,
            missing,
            source,
            feedback: None,
        }
    }

    pub fn with_feedback(mut self, feedback: Option<String>) -> Self {
        self.feedback = feedback;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_thresholds() {
        assert_eq!(Status::from_score(100), Status::Success);
        assert_eq!(Status::from_score(70), Status::Success);
        assert_eq!(Status::from_score(69), Status::Partial);
        assert_eq!(Status::from_score(40), Status::Partial);
        assert_eq!(Status::from_score(39), Status::Error);
        assert_eq!(Status::from_score(0), Status::Error);
    }

    #[test]
    fn status_display_and_parse() {
        assert_eq!(Status::Partial.to_string(), "partial");
        assert_eq!("SUCCESS".parse::<Status>().unwrap(), Status::Success);
        assert!("great".parse::<Status>().is_err());
    }

    #[test]
    fn result_clamps_score_and_derives_status() {
        let result = ScoringResult::new(250, vec![], vec![], Source::Oracle);
        assert_eq!(result.score, 100);
        assert_eq!(result.status, Status::Success);
    }

    #[test]
    fn question_accepts_numeric_id_and_missing_key_points() {
        let json = r#"{
            "id": 12,
            "category": "exterieur",
            "question": "Montrez le voyant des feux de brouillard arrière.",
            "expectedAnswer": "Voyant orange."
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, "12");
        assert!(q.key_points.is_empty());
    }

    #[test]
    fn result_serializes_lowercase_enums() {
        let result = ScoringResult::new(
            50,
            vec!["freins".into()],
            vec!["pneus".into()],
            Source::Keywords,
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "partial");
        assert_eq!(json["source"], "keywords");
        assert!(json.get("feedback").is_none());
    }

    #[test]
    fn bank_categories_are_sorted_and_distinct() {
        let make = |id: &str, cat: &str| Question {
            id: id.into(),
            category: cat.into(),
            question: "q".into(),
            expected_answer: "a".into(),
            key_points: vec![],
        };
        let bank = QuestionBank::new(vec![
            make("1", "secours"),
            make("2", "interieur"),
            make("3", "secours"),
        ]);
        assert_eq!(bank.categories(), vec!["interieur", "secours"]);
        let filter: CategoryFilter = "secours".parse().unwrap();
        assert_eq!(bank.by_category(&filter).count(), 2);
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
    }
}
