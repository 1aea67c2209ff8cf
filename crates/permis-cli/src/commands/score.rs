//! The `permis score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::feedback::render_feedback;
use crate::OutputFormat;

pub async fn execute(
    id: String,
    answer: String,
    questions: Option<PathBuf>,
    config_path: Option<PathBuf>,
    offline: bool,
    format: OutputFormat,
) -> Result<()> {
    let (config, questions_path) = super::load_settings(config_path.as_deref(), questions)?;
    let bank = super::load_bank(&questions_path);

    let question = bank.get(&id).with_context(|| {
        format!(
            "question not found: {id} ({} questions in {})",
            bank.len(),
            questions_path.display()
        )
    })?;

    let engine = permis_oracle::build_engine(&config, offline)?;
    let result = engine.score(&answer, question).await;
    tracing::debug!(score = result.score, source = %result.source, "answer scored");

    match format {
        OutputFormat::Text => {
            println!("[{}] {}", question.category, question.question);
            println!();
            print!("{}", render_feedback(&result, question));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
