//! HTTP gateway for the cyber-risk engine
//!
//! Authenticated JSON API over assessment storage, stats and the threat
//! advisory catalog. Scoring itself lives in `risk_engine`.

pub mod auth;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notify;
pub mod rate_limit;
pub mod router;
pub mod state;
pub mod store;

pub use config::GatewayConfig;
pub use router::create_router;
pub use state::AppState;
