//! Configuration and oracle factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use permis_core::engine::{ScoringEngine, ScoringEngineConfig};
use permis_core::traits::ScoringOracle;

use crate::gemini::GeminiOracle;
use crate::http::HttpOracle;

/// Configuration for the remote scoring oracle.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OracleConfig {
    /// A service implementing the oracle HTTP contract.
    Http {
        endpoint: String,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
    /// Gemini, called directly.
    Gemini {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        /// Candidate models in order of preference.
        #[serde(default)]
        models: Vec<String>,
        /// Single model replacing the candidate list.
        #[serde(default)]
        model: Option<String>,
    },
}

impl std::fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleConfig::Http {
                endpoint,
                timeout_secs,
            } => f
                .debug_struct("Http")
                .field("endpoint", endpoint)
                .field("timeout_secs", timeout_secs)
                .finish(),
            OracleConfig::Gemini {
                api_key: _,
                base_url,
                models,
                model,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("models", models)
                .field("model", model)
                .finish(),
        }
    }
}

/// Top-level permis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermisConfig {
    /// Question bank file.
    #[serde(default = "default_questions")]
    pub questions: PathBuf,
    /// Bound on one oracle attempt, in seconds.
    #[serde(default = "default_attempt_timeout")]
    pub attempt_timeout_secs: u64,
    /// Remote oracle; absent means local scoring only.
    #[serde(default)]
    pub oracle: Option<OracleConfig>,
}

fn default_questions() -> PathBuf {
    PathBuf::from("data/questions.json")
}
fn default_attempt_timeout() -> u64 {
    20
}

impl Default for PermisConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            attempt_timeout_secs: default_attempt_timeout(),
            oracle: None,
        }
    }
}

impl PermisConfig {
    pub fn engine_config(&self) -> ScoringEngineConfig {
        ScoringEngineConfig {
            attempt_timeout: Some(Duration::from_secs(self.attempt_timeout_secs)),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    resolve_with(s, |name| std::env::var(name).ok())
}

fn resolve_with(s: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = lookup(var_name).unwrap_or_default();
        result.replace_range(start..start + end + 1, &value);
        from = start + value.len();
    }
    result
}

/// Resolve env vars in an oracle config.
fn resolve_oracle_config(config: &OracleConfig) -> OracleConfig {
    match config {
        OracleConfig::Http {
            endpoint,
            timeout_secs,
        } => OracleConfig::Http {
            endpoint: resolve_env_vars(endpoint),
            timeout_secs: *timeout_secs,
        },
        OracleConfig::Gemini {
            api_key,
            base_url,
            models,
            model,
        } => OracleConfig::Gemini {
            api_key: resolve_env_vars(api_key),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u)),
            models: models.iter().map(|m| resolve_env_vars(m)).collect(),
            model: model.as_ref().map(|m| resolve_env_vars(m)),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `permis.toml` in the current directory
/// 2. `~/.config/permis/config.toml`
///
/// Environment variable overrides: `PERMIS_ORACLE_URL`, `GEMINI_API_KEY`,
/// `GEMINI_MODEL`.
pub fn load_config() -> Result<PermisConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PermisConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("permis.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PermisConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PermisConfig::default(),
    };

    Ok(apply_env_overrides(config, |name| std::env::var(name).ok()))
}

/// Apply environment overrides, then resolve `${VAR}` references.
fn apply_env_overrides(
    mut config: PermisConfig,
    env: impl Fn(&str) -> Option<String>,
) -> PermisConfig {
    if let Some(url) = env("PERMIS_ORACLE_URL").filter(|u| !u.trim().is_empty()) {
        config.oracle = Some(OracleConfig::Http {
            endpoint: url,
            timeout_secs: None,
        });
    }

    if let Some(key) = env("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
        match &mut config.oracle {
            Some(OracleConfig::Gemini { api_key, .. }) => *api_key = key,
            None => {
                config.oracle = Some(OracleConfig::Gemini {
                    api_key: key,
                    base_url: None,
                    models: Vec::new(),
                    model: None,
                })
            }
            Some(OracleConfig::Http { .. }) => {}
        }
    }

    if let Some(name) = env("GEMINI_MODEL").filter(|m| !m.trim().is_empty()) {
        if let Some(OracleConfig::Gemini { model, .. }) = &mut config.oracle {
            *model = Some(name);
        }
    }

    config.oracle = config.oracle.as_ref().map(resolve_oracle_config);
    config
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("permis"))
}

/// Create an oracle instance from its configuration.
pub fn create_oracle(config: &OracleConfig) -> Result<Arc<dyn ScoringOracle>> {
    match config {
        OracleConfig::Http {
            endpoint,
            timeout_secs,
        } => Ok(Arc::new(HttpOracle::new(endpoint, *timeout_secs)?)),
        OracleConfig::Gemini {
            api_key,
            base_url,
            models,
            model,
        } => {
            let candidates = match model {
                Some(single) => vec![single.clone()],
                None => models.clone(),
            };
            Ok(Arc::new(GeminiOracle::new(
                api_key,
                base_url.clone(),
                candidates,
            )?))
        }
    }
}

/// Build the scoring engine described by `config`. With `offline` set, or
/// without an oracle, the engine scores locally only.
pub fn build_engine(config: &PermisConfig, offline: bool) -> Result<ScoringEngine> {
    match (&config.oracle, offline) {
        (Some(oracle_config), false) => {
            let oracle = create_oracle(oracle_config)?;
            tracing::debug!("scoring with {} oracle", oracle.name());
            Ok(ScoringEngine::with_oracle(oracle, config.engine_config()))
        }
        _ => Ok(ScoringEngine::local_only()),
    }
}
