//! Risk Engine
//!
//! Deterministic cyber-risk scoring over questionnaire answers:
//! - `normalizer`: raw client, server and submission records to canonical input
//! - `scoring`: the weighted-penalty and uniform-fraction policies
//! - `classifier`: score to risk tier
//! - `threats`, `vulnerabilities`, `recommendations`: derived tables
//! - `events`: completed / high-risk events for notification
//! - `engine`: orchestrator
//!
//! Every stage is a pure function of its input; nothing here logs or
//! touches I/O.

pub mod normalizer;
pub mod scoring;
pub mod classifier;
pub mod threats;
pub mod vulnerabilities;
pub mod recommendations;
pub mod events;
pub mod engine;

use types::assessment::AssessmentInput;
use types::errors::ScoringError;
use types::risk::{AssessmentResult, ScoringPolicy};

pub use engine::{RiskEngine, RiskEngineConfig};
pub use normalizer::Normalize;

/// Score canonical input with the default engine configuration
pub fn score(input: &AssessmentInput, policy: ScoringPolicy) -> Result<AssessmentResult, ScoringError> {
    RiskEngine::new().assess(input, policy)
}
