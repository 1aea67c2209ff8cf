//! HTTP scoring oracle client.
//!
//! Talks to any service implementing the oracle contract: `POST` of
//! `{question, expectedAnswer, userAnswer}`, answered with a JSON object.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;

use permis_core::error::OracleError;
use permis_core::traits::{OracleRequest, ScoringOracle};

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Oracle reached over plain HTTP.
pub struct HttpOracle {
    endpoint: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpOracle {
    pub fn new(endpoint: &str, timeout_secs: Option<u64>) -> Result<Self, OracleError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            return Err(OracleError::NotConfigured("empty oracle endpoint".into()));
        }

        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| OracleError::NotConfigured(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            timeout_secs,
            client,
        })
    }
}

#[async_trait]
impl ScoringOracle for HttpOracle {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    async fn consult(&self, request: &OracleRequest) -> Result<Value, OracleError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Timeout(self.timeout_secs)
                } else {
                    OracleError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::AuthenticationFailed(body));
        }
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::ApiError {
                status,
                message: body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| OracleError::MalformedResponse(format!("failed to parse response: {e}")))
    }
}
