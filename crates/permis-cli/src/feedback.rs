//! Plain-text rendering of questions and scoring results.

use std::fmt::Write;

use permis_core::model::{Question, ScoringResult, Status};
use permis_core::session::QuizSession;

/// Feedback block shown after an answer is scored.
pub fn render_feedback(result: &ScoringResult, question: &Question) -> String {
    let mut out = String::new();

    match result.status {
        Status::Success => {
            out.push_str("✓ Bonne réponse\n");
            out.push_str("Vous avez bien mentionné les points essentiels.\n");
        }
        Status::Partial => {
            let _ = writeln!(out, "~ Réponse incomplète ({}%)", result.score);
            if !result.missing.is_empty() {
                out.push_str("Points manquants à mentionner :\n");
                push_list(&mut out, &result.missing);
            }
            if !result.found.is_empty() {
                let _ = writeln!(
                    out,
                    "Points correctement identifiés : {}",
                    result.found.join(", ")
                );
            }
        }
        Status::Error => {
            let _ = writeln!(out, "✗ Réponse à améliorer ({}%)", result.score);
            if !result.missing.is_empty() {
                out.push_str("Les points suivants devaient être mentionnés :\n");
                push_list(&mut out, &result.missing);
            }
            if !result.found.is_empty() {
                let _ = writeln!(out, "Points corrects : {}", result.found.join(", "));
            }
        }
    }

    if let Some(comment) = &result.feedback {
        let _ = writeln!(out, "Commentaire : {comment}");
    }
    let _ = writeln!(out, "Réponse type attendue : {}", question.expected_answer);
    let _ = writeln!(out, "(analyse : {})", result.source);

    out
}

fn push_list(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

/// Header for the session's current question.
pub fn render_question(session: &QuizSession) -> String {
    match session.current() {
        Some(q) => {
            let (position, total) = session.progress();
            format!("[{}] {position} / {total}\n{}\n", q.category, q.question)
        }
        None => "Aucune question disponible.\n".to_string(),
    }
}
