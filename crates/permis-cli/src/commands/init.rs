//! The `permis init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    write_if_absent(Path::new("permis.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("data").context("failed to create data/")?;
    write_if_absent(Path::new("data/questions.json"), SAMPLE_QUESTIONS)?;

    println!("\nNext steps:");
    println!("  1. Set GEMINI_API_KEY, or edit permis.toml to point at your oracle");
    println!("  2. Run: permis validate");
    println!("  3. Run: permis quiz");

    Ok(())
}

fn write_if_absent(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# permis configuration

questions = "data/questions.json"
attempt_timeout_secs = 20

# Without an [oracle] section answers are scored on key points only.
# GEMINI_API_KEY or PERMIS_ORACLE_URL in the environment also enable one.

# [oracle]
# type = "gemini"
# api_key = "${GEMINI_API_KEY}"
# models = ["gemini-2.0-flash", "gemini-1.5-flash"]

# [oracle]
# type = "http"
# endpoint = "http://localhost:8888/.netlify/functions/analyze-gemini"
# timeout_secs = 20
"#;

const SAMPLE_QUESTIONS: &str = r#"{
  "questions": [
    {
      "id": 1,
      "category": "interieur",
      "question": "Montrez où s'effectue le réglage de la hauteur des feux.",
      "expectedAnswer": "La molette de réglage se trouve à gauche du volant. On règle la hauteur selon la charge du véhicule pour ne pas éblouir les autres usagers.",
      "keyPoints": ["molette", "gauche du volant", "charge du véhicule", "éblouir"]
    },
    {
      "id": 2,
      "category": "exterieur",
      "question": "Contrôlez l'état des pneumatiques.",
      "expectedAnswer": "On vérifie l'usure de la bande de roulement, l'absence de hernie ou de coupure, et la pression à froid avec un manomètre.",
      "keyPoints": ["usure", "hernie", "coupure", "pression", "manomètre"]
    },
    {
      "id": 3,
      "category": "exterieur",
      "question": "Vérifiez le niveau du liquide de refroidissement.",
      "expectedAnswer": "Moteur froid, le niveau doit se situer entre les repères mini et maxi du vase d'expansion.",
      "keyPoints": ["moteur froid", "mini et maxi", "vase d'expansion"]
    },
    {
      "id": 4,
      "category": "secours",
      "question": "Quelles sont les trois étapes de l'alerte des secours ?",
      "expectedAnswer": "Se présenter, indiquer le lieu précis de l'accident, décrire le nombre de victimes et leur état. Ne raccrocher que lorsque l'opérateur le demande.",
      "keyPoints": ["se présenter", "lieu précis", "nombre de victimes", "ne pas raccrocher"]
    }
  ]
}
"#;
