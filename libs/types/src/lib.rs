//! Types library for the cyber-risk assessment service
//!
//! This library provides the type definitions shared by the scoring engine
//! and the HTTP gateway, so both agree on wire names and invariants.
//!
//! # Modules
//! - `ids`: Unique identifiers (AssessmentId, UserId, AdvisoryId)
//! - `control`: Security controls and their present/absent flags
//! - `assessment`: Canonical questionnaire input and persisted record
//! - `risk`: Scores, risk tiers, threats, vulnerabilities, recommendations
//! - `stats`: Aggregate statistics over assessment history
//! - `advisory`: Threat advisory catalog entries
//! - `errors`: Error taxonomy

pub mod ids;
pub mod control;
pub mod assessment;
pub mod risk;
pub mod stats;
pub mod advisory;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::control::*;
    pub use crate::assessment::*;
    pub use crate::risk::*;
    pub use crate::stats::*;
    pub use crate::advisory::*;
    pub use crate::errors::*;
}
