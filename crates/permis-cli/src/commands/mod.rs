pub mod init;
pub mod list;
pub mod quiz;
pub mod score;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;

use permis_core::model::QuestionBank;
use permis_core::parser::load_question_bank_or_empty;
use permis_oracle::config::{load_config_from, PermisConfig};

/// Load the configuration and resolve which question bank file to use.
pub fn load_settings(
    config_path: Option<&Path>,
    questions: Option<PathBuf>,
) -> Result<(PermisConfig, PathBuf)> {
    let config = load_config_from(config_path)?;
    let questions = questions.unwrap_or_else(|| config.questions.clone());
    Ok((config, questions))
}

/// Load the question bank; an unreadable bank is an empty one.
pub fn load_bank(path: &Path) -> QuestionBank {
    load_question_bank_or_empty(path)
}
