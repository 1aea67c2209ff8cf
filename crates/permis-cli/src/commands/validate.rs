//! The `permis validate` command.

use std::path::PathBuf;

use anyhow::Result;

use permis_core::parser::{load_question_bank, validate_question_bank};

pub fn execute(questions: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let (_, questions_path) = super::load_settings(config_path.as_deref(), questions)?;
    let bank = load_question_bank(&questions_path)?;

    println!(
        "Question bank: {} ({} questions, {} categories)",
        questions_path.display(),
        bank.len(),
        bank.categories().len()
    );

    let warnings = validate_question_bank(&bank);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
