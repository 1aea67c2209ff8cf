//! The `permis list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use permis_core::model::{CategoryFilter, Question};

pub fn execute(
    questions: Option<PathBuf>,
    category: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, questions_path) = super::load_settings(config_path.as_deref(), questions)?;
    let bank = super::load_bank(&questions_path);

    let filter = match category {
        Some(c) => c.parse::<CategoryFilter>().map_err(anyhow::Error::msg)?,
        None => CategoryFilter::All,
    };

    let selected: Vec<&Question> = bank
        .questions
        .iter()
        .filter(|q| filter.matches(q))
        .collect();
    if selected.is_empty() {
        println!("No questions found in {}.", questions_path.display());
        return Ok(());
    }

    println!("{}", question_table(&selected));
    println!("\nCategories: {}", bank.categories().join(", "));

    Ok(())
}

fn question_table(questions: &[&Question]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Category", "Question", "Key points"]);

    for q in questions {
        table.add_row(vec![
            q.id.clone(),
            q.category.clone(),
            q.question.clone(),
            q.key_points.len().to_string(),
        ]);
    }

    table
}
