//! Gemini scoring oracle.
//!
//! Asks a Gemini model to grade the answer as a driving examiner would, and
//! translates its JSON verdict into the oracle contract shape. Candidate
//! models are tried in order; only a "model not found" answer moves on to
//! the next one.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::instrument;

use permis_core::error::OracleError;
use permis_core::traits::{OracleRequest, ScoringOracle};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Candidate models, most preferred first. Availability varies by account
/// and region.
pub const DEFAULT_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-2.0-flash-exp",
    "gemini-1.5-flash",
    "gemini-1.5-flash-8b",
    "gemini-1.5-pro",
    "gemini-pro",
];

/// Gemini-backed oracle.
pub struct GeminiOracle {
    api_key: String,
    base_url: String,
    models: Vec<String>,
    client: reqwest::Client,
}

impl GeminiOracle {
    pub fn new(
        api_key: &str,
        base_url: Option<String>,
        models: Vec<String>,
    ) -> Result<Self, OracleError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| OracleError::NotConfigured(format!("failed to build HTTP client: {e}")))?;

        let models = if models.is_empty() {
            DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
        } else {
            models
        };

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            models,
            client,
        })
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    #[instrument(skip(self, prompt))]
    async fn generate(&self, model: &str, prompt: &str) -> Result<Value, OracleError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent?key={}",
                self.base_url,
                model,
                urlencoding::encode(&self.api_key)
            ))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout(DEFAULT_TIMEOUT_SECS)
                } else {
                    OracleError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(OracleError::ModelNotFound(model.to_string()));
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::AuthenticationFailed(body));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::ApiError {
                status,
                message: body,
            });
        }

        let api_response: GeminiResponse = response.json().await.map_err(|e| {
            OracleError::MalformedResponse(format!("failed to parse response: {e}"))
        })?;

        let text = api_response.text();
        let verdict = extract_json_object(&text).ok_or_else(|| {
            OracleError::MalformedResponse(format!("no JSON object in model output: {text}"))
        })?;

        Ok(to_contract(verdict))
    }
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

impl GeminiResponse {
    /// Text parts of the first candidate, joined by newlines.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}

#[async_trait]
impl ScoringOracle for GeminiOracle {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn consult(&self, request: &OracleRequest) -> Result<Value, OracleError> {
        if self.api_key.trim().is_empty() {
            return Err(OracleError::NotConfigured("missing Gemini API key".into()));
        }

        let prompt = build_prompt(request);
        let mut last_error = None;
        let mut tried = 0;

        for model in &self.models {
            tried += 1;
            match self.generate(model, &prompt).await {
                Ok(payload) => return Ok(payload),
                Err(e) if e.is_model_not_found() => {
                    tracing::warn!("model {model} not found, trying next candidate");
                    last_error = Some(e);
                }
                Err(e) => {
                    tracing::error!("Gemini call failed with {model}: {e}");
                    return Err(e);
                }
            }
        }

        Err(OracleError::Exhausted {
            tried,
            last: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no candidate model configured".to_string()),
        })
    }
}

/// Examiner prompt for one answer.
pub fn build_prompt(request: &OracleRequest) -> String {
    format!(
        r#"Tu es examinateur du permis de conduire B (vérifications intérieures et extérieures, sécurité routière, premiers secours).
Évalue la réponse d'un élève par rapport à la réponse de référence.

Réponds UNIQUEMENT avec un objet JSON valide, sans texte autour, de la forme :
{{
  "status": "success" | "partial" | "error",
  "score": 0-100,
  "foundConcepts": ["..."],
  "missingConcepts": ["..."],
  "explanation": "une phrase courte en français"
}}

- "success" : la réponse suffit pour l'examen.
- "partial" : des éléments corrects mais des points importants manquent.
- "error" : hors sujet ou très incomplet.

Question :
"""{question}"""

Réponse de référence :
"""{expected}"""

Réponse de l'élève :
"""{answer}"""
"#,
        question = request.question,
        expected = request.expected_answer,
        answer = request.user_answer,
    )
}

/// Parse the span between the first `{` and the last `}` of `text`.
fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Rename the model's fields to the oracle contract: `foundConcepts` to
/// `found`, `missingConcepts` to `missing`, `explanation` to `feedback`.
fn to_contract(mut verdict: Map<String, Value>) -> Value {
    let mut take = |key: &str| verdict.remove(key).unwrap_or(Value::Null);
    json!({
        "status": take("status"),
        "score": take("score"),
        "found": take("foundConcepts"),
        "missing": take("missingConcepts"),
        "feedback": take("explanation"),
    })
}
