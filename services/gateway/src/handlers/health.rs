use axum::Json;
use serde_json::{Value, json};

/// Service banner with the endpoint map
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "CyberRisk Analyzer API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "/health",
            "assessments": "/v1/assessments",
            "stats": "/v1/assessments/stats/summary",
            "preview": "/v1/assessments/preview",
            "threats": "/v1/threats"
        }
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
