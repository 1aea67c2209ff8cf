//! The `permis quiz` command: an interactive session on stdin.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use rand::Rng;

use permis_core::model::CategoryFilter;
use permis_core::session::QuizSession;
use permis_core::ScoringEngine;

use crate::feedback::{render_feedback, render_question};

const HELP: &str = "Tapez votre réponse puis Entrée. Commandes : \
:n suivante, :p précédente, :r au hasard, :c <catégorie|all>, :q quitter";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Blank,
    Answer(String),
    Next,
    Previous,
    Random,
    ListCategories,
    Category(CategoryFilter),
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Blank;
    }
    let Some(command) = trimmed.strip_prefix(':') else {
        return Input::Answer(trimmed.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name {
        "n" => Input::Next,
        "p" => Input::Previous,
        "r" => Input::Random,
        "q" => Input::Quit,
        "h" | "?" => Input::Help,
        "c" => match arg.parse::<CategoryFilter>() {
            Ok(filter) => Input::Category(filter),
            Err(_) => Input::ListCategories,
        },
        _ => Input::Unknown(trimmed.to_string()),
    }
}

pub async fn execute(
    questions: Option<PathBuf>,
    category: Option<String>,
    config_path: Option<PathBuf>,
    offline: bool,
) -> Result<()> {
    let (config, questions_path) = super::load_settings(config_path.as_deref(), questions)?;
    let bank = super::load_bank(&questions_path);
    let engine = permis_oracle::build_engine(&config, offline)?;

    let mut session = QuizSession::new(bank);
    if let Some(category) = category {
        session.set_category(category.parse().map_err(anyhow::Error::msg)?);
    }
    tracing::debug!(
        questions = session.len(),
        strategies = ?engine.strategy_names(),
        "starting quiz"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(
        &engine,
        &mut session,
        stdin.lock(),
        stdout.lock(),
        &mut rand::rng(),
    )
    .await
}

/// Drive a quiz session from `input` until `:q` or end of input.
///
/// Each question shown accepts a single answer; navigating away (or back)
/// allows answering again.
pub async fn run_session<R, W, G>(
    engine: &ScoringEngine,
    session: &mut QuizSession,
    input: R,
    mut out: W,
    rng: &mut G,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    G: Rng,
{
    writeln!(out, "{HELP}")?;
    write!(out, "\n{}", render_question(session))?;
    out.flush()?;

    let mut answered = false;

    for line in input.lines() {
        let line = line?;
        let moved = match parse_input(&line) {
            Input::Blank => false,
            Input::Answer(answer) => {
                match session.current() {
                    None => writeln!(out, "Aucune question disponible.")?,
                    Some(_) if answered => writeln!(
                        out,
                        "Vous avez déjà répondu. Passez à une autre question (:n, :p, :r)."
                    )?,
                    Some(question) => {
                        let result = engine.score(&answer, question).await;
                        write!(out, "\n{}", render_feedback(&result, question))?;
                        answered = true;
                    }
                }
                false
            }
            Input::Next => {
                let moved = session.advance();
                if !moved {
                    writeln!(out, "C'est la dernière question.")?;
                }
                moved
            }
            Input::Previous => {
                let moved = session.go_back();
                if !moved {
                    writeln!(out, "C'est la première question.")?;
                }
                moved
            }
            Input::Random => {
                let moved = session.random(rng);
                if !moved {
                    writeln!(out, "Pas assez de questions pour un tirage au hasard.")?;
                }
                moved
            }
            Input::ListCategories => {
                writeln!(
                    out,
                    "Catégories : all, {}",
                    session.bank().categories().join(", ")
                )?;
                false
            }
            Input::Category(filter) => {
                session.set_category(filter);
                writeln!(
                    out,
                    "Catégorie : {} ({} questions)",
                    session.filter(),
                    session.len()
                )?;
                true
            }
            Input::Help => {
                writeln!(out, "{HELP}")?;
                false
            }
            Input::Quit => break,
            Input::Unknown(command) => {
                writeln!(out, "Commande inconnue : {command}")?;
                false
            }
        };

        if moved {
            answered = false;
            write!(out, "\n{}", render_question(session))?;
        }
        out.flush()?;
    }

    writeln!(out, "Au revoir !")?;
    Ok(())
}
