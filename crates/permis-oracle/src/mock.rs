//! Mock oracle for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use permis_core::error::OracleError;
use permis_core::traits::{OracleRequest, ScoringOracle};

/// A mock oracle for exercising the scoring engine without network access.
///
/// Either always returns the same payload or is always unavailable.
pub struct MockOracle {
    /// Payload to return; `None` means unavailable.
    payload: Option<Value>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last request received.
    last_request: Mutex<Option<OracleRequest>>,
}

impl MockOracle {
    /// Create a mock that always returns `payload`.
    pub fn with_fixed_payload(payload: Value) -> Self {
        Self {
            payload: Some(payload),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that is never reachable.
    pub fn unavailable() -> Self {
        Self {
            payload: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this oracle.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this oracle.
    pub fn last_request(&self) -> Option<OracleRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ScoringOracle for MockOracle {
    fn name(&self) -> &str {
        "mock"
    }

    async fn consult(&self, request: &OracleRequest) -> Result<Value, OracleError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        self.payload
            .clone()
            .ok_or_else(|| OracleError::NetworkError("mock oracle is unavailable".into()))
    }
}
