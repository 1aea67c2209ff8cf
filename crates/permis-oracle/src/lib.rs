//! permis-oracle: Remote scoring oracle backends.
//!
//! Implements the `ScoringOracle` trait for an HTTP oracle service and for
//! Gemini called directly, and builds the scoring engine from configuration.

pub mod config;
pub mod gemini;
pub mod http;
pub mod mock;

pub use config::{build_engine, create_oracle, load_config, OracleConfig, PermisConfig};
pub use permis_core::error::OracleError;
