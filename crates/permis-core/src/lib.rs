//! permis-core: Answer normalization, key-point matching and scoring.
//!
//! This crate defines the data model, the local scoring engine, the remote
//! scoring adapter and the orchestrator that chains them, plus the question
//! bank loader and quiz navigation state the front ends build on.

pub mod engine;
pub mod error;
pub mod local;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod remote;
pub mod session;
pub mod traits;

pub use engine::{ScoringEngine, ScoringEngineConfig};
pub use error::OracleError;
pub use local::score_locally;
pub use model::{CategoryFilter, Question, QuestionBank, ScoringResult, Source, Status};
pub use normalize::normalize;
