//! End-to-end tests for the HTTP API
//!
//! Drives the full router in-process with a recording notification sink
//! and a manual clock.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{TimeZone, Utc};
use gateway::clock::ManualClock;
use gateway::notify::RecordingSink;
use gateway::store::InMemoryAssessmentRepository;
use gateway::{AppState, GatewayConfig, create_router};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;
use types::ids::UserId;

const SECRET: &str = "integration-secret";

struct TestApp {
    router: Router,
    sink: Arc<RecordingSink>,
    clock: Arc<ManualClock>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_config(GatewayConfig::new(SECRET))
    }

    fn with_config(config: GatewayConfig) -> Self {
        let sink = Arc::new(RecordingSink::new());
        let clock = Arc::new(ManualClock::starting_at(
            Utc.with_ymd_and_hms(2024, 2, 16, 12, 0, 0).unwrap(),
        ));
        let state = AppState::with_parts(
            config,
            Arc::new(InMemoryAssessmentRepository::new()),
            sink.clone(),
            clock.clone(),
        );
        Self {
            router: create_router(state),
            sink,
            clock,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn high_risk_notifications(&self) -> usize {
        self.sink.events().iter().filter(|e| e.is_high_risk()).count()
    }
}

fn token_for(user: UserId, role: Option<&str>) -> String {
    let exp = Utc::now().timestamp() + 3600;
    let mut claims = json!({ "sub": user, "exp": exp });
    if let Some(role) = role {
        claims["role"] = json!(role);
    }
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

fn user_token() -> String {
    token_for(UserId::new(), None)
}

/// Seven of the ten uniform-fraction controls present
fn medium_risk_form() -> Value {
    json!({
        "companyName": "Acme Ltda",
        "sector": "Technology",
        "employeeCount": "11-50",
        "controls": {
            "firewall": true,
            "antivirus": true,
            "backup": true,
            "training": true,
            "incidentResponse": true,
            "passwordPolicy": true,
            "encryption": true
        }
    })
}

fn no_controls_form() -> Value {
    json!({
        "companyName": "Exposed Inc",
        "sector": "Retail",
        "employeeCount": "1-10"
    })
}

// ── Public endpoints ──

#[tokio::test]
async fn test_health_and_banner_need_no_token() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = app.send(Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["assessments"], "/v1/assessments");
}

// ── Authentication ──

#[tokio::test]
async fn test_missing_or_invalid_token_is_401() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/v1/assessments", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");

    let (status, _) = app
        .send(Method::GET, "/v1/assessments", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = encode(
        &Header::new(Algorithm::HS256),
        &json!({ "sub": UserId::new(), "exp": Utc::now().timestamp() + 60 }),
        &EncodingKey::from_secret(b"wrong-secret"),
    )
    .unwrap();
    let (status, _) = app
        .send(Method::GET, "/v1/assessments", Some(&forged), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ── Assessments ──

#[tokio::test]
async fn test_create_scores_and_persists() {
    let app = TestApp::new();
    let token = user_token();

    let (status, created) = app
        .send(Method::POST, "/v1/assessments", Some(&token), Some(medium_risk_form()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["result"]["score"], 30);
    assert_eq!(created["result"]["securityScore"], 70);
    assert_eq!(created["result"]["riskLevel"], "Medium");
    assert_eq!(created["result"]["policy"], "uniformFraction");
    assert_eq!(created["input"]["companyName"], "Acme Ltda");

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = app
        .send(Method::GET, &format!("/v1/assessments/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_other_users_assessment_is_404() {
    let app = TestApp::new();
    let owner = user_token();
    let stranger = user_token();

    let (_, created) = app
        .send(Method::POST, "/v1/assessments", Some(&owner), Some(medium_risk_form()))
        .await;
    let uri = format!("/v1/assessments/{}", created["id"].as_str().unwrap());

    let (status, _) = app.send(Method::GET, &uri, Some(&stranger), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&stranger), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_stats_reflect_created_assessments() {
    let app = TestApp::new();
    let token = user_token();

    let (_, body) = app
        .send(Method::GET, "/v1/assessments/stats/summary", Some(&token), None)
        .await;
    assert_eq!(body["total"], 0);
    assert!(body["latest"].is_null());

    app.send(Method::POST, "/v1/assessments", Some(&token), Some(medium_risk_form()))
        .await;
    app.clock.advance_secs(60);
    let (_, latest) = app
        .send(Method::POST, "/v1/assessments", Some(&token), Some(no_controls_form()))
        .await;

    let (status, body) = app
        .send(Method::GET, "/v1/assessments/stats/summary", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["byRiskLevel"]["Medium"], 1);
    assert_eq!(body["byRiskLevel"]["Critical"], 1);
    assert_eq!(body["averageScore"], 65);
    assert_eq!(body["latest"]["id"], latest["id"]);
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = TestApp::new();
    let token = user_token();
    let (_, created) = app
        .send(Method::POST, "/v1/assessments", Some(&token), Some(medium_risk_form()))
        .await;
    let uri = format!("/v1/assessments/{}", created["id"].as_str().unwrap());

    let (status, _) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send(Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_high_risk_create_notifies_once() {
    let app = TestApp::new();
    let token = user_token();

    app.send(Method::POST, "/v1/assessments", Some(&token), Some(medium_risk_form()))
        .await;
    assert_eq!(app.high_risk_notifications(), 0);
    assert_eq!(app.sink.events().len(), 1);

    let (status, created) = app
        .send(Method::POST, "/v1/assessments", Some(&token), Some(no_controls_form()))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["result"]["riskLevel"], "Critical");
    assert_eq!(app.high_risk_notifications(), 1);
}

#[tokio::test]
async fn test_invalid_sector_is_rejected_without_storing() {
    let app = TestApp::new();
    let token = user_token();
    let mut form = medium_risk_form();
    form["sector"] = json!("InvalidSector");

    let (status, body) = app
        .send(Method::POST, "/v1/assessments", Some(&token), Some(form))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["field"], "sector");

    let (_, page) = app.send(Method::GET, "/v1/assessments", Some(&token), None).await;
    assert_eq!(page["total"], 0);
    assert!(app.sink.events().is_empty());
}

#[tokio::test]
async fn test_weighted_policy_requires_context() {
    let app = TestApp::new();
    let token = user_token();
    let mut form = medium_risk_form();
    form["policy"] = json!("weightedPenalty");

    let (status, body) = app
        .send(Method::POST, "/v1/assessments", Some(&token), Some(form.clone()))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "systemComplexity");

    form["systemComplexity"] = json!("high");
    form["dataSensitivity"] = json!("high");
    let (status, body) = app
        .send(Method::POST, "/v1/assessments", Some(&token), Some(form))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    // updatePolicy (10) and accessControl (15) absent: 25 × 1.3 × 1.5 = 48.75
    assert_eq!(body["result"]["score"], 49);
    assert_eq!(body["result"]["policy"], "weightedPenalty");
}

#[tokio::test]
async fn test_partial_update_rescores() {
    let app = TestApp::new();
    let token = user_token();
    let (_, created) = app
        .send(Method::POST, "/v1/assessments", Some(&token), Some(medium_risk_form()))
        .await;
    let uri = format!("/v1/assessments/{}", created["id"].as_str().unwrap());

    app.clock.advance_secs(300);
    let patch = json!({ "controls": { "twoFactorAuth": true, "accessControl": true } });
    let (status, updated) = app.send(Method::PUT, &uri, Some(&token), Some(patch)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["result"]["score"], 10);
    assert_eq!(updated["result"]["riskLevel"], "Low");
    assert_eq!(updated["input"]["companyName"], "Acme Ltda");
    assert_eq!(updated["input"]["controls"]["firewall"], true);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);

    let (status, body) = app
        .send(Method::PUT, &uri, Some(&token), Some(json!({ "employeeCount": "lots" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "employeeCount");
}

#[tokio::test]
async fn test_list_paginates_and_sorts() {
    let app = TestApp::new();
    let token = user_token();
    for name in ["Bravo", "Alpha", "Charlie"] {
        let mut form = medium_risk_form();
        form["companyName"] = json!(name);
        app.send(Method::POST, "/v1/assessments", Some(&token), Some(form))
            .await;
        app.clock.advance_secs(10);
    }

    let (status, page) = app
        .send(Method::GET, "/v1/assessments?limit=2", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["pages"], 2);
    assert_eq!(page["data"].as_array().unwrap().len(), 2);
    assert_eq!(page["data"][0]["input"]["companyName"], "Charlie");

    let (_, page) = app
        .send(
            Method::GET,
            "/v1/assessments?page=2&limit=2&sort=companyName",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(page["page"], 2);
    assert_eq!(page["data"][0]["input"]["companyName"], "Charlie");

    let (status, _) = app
        .send(Method::GET, "/v1/assessments?limit=0", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_preview_does_not_persist() {
    let app = TestApp::new();
    let token = user_token();
    let (status, body) = app
        .send(Method::POST, "/v1/assessments/preview", Some(&token), Some(no_controls_form()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["score"], 100);
    assert_eq!(body["input"]["sector"], "Retail");

    let (_, page) = app.send(Method::GET, "/v1/assessments", Some(&token), None).await;
    assert_eq!(page["total"], 0);
    assert!(app.sink.events().is_empty());
}

#[tokio::test]
async fn test_rate_limit_returns_429() {
    let mut config = GatewayConfig::new(SECRET);
    config.rate_limit_per_minute = 2;
    let app = TestApp::with_config(config);
    let token = user_token();

    for _ in 0..2 {
        let (status, _) = app.send(Method::GET, "/v1/assessments", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = app.send(Method::GET, "/v1/assessments", Some(&token), None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "RATE_LIMIT_EXCEEDED");
}

// ── Threat advisories ──

#[tokio::test]
async fn test_threat_catalog_listing() {
    let app = TestApp::new();
    let token = user_token();

    let (status, body) = app.send(Method::GET, "/v1/threats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let all = body.as_array().unwrap();
    assert_eq!(all.len(), 8);
    assert_eq!(all[0]["severity"], "Critical");

    let (_, body) = app
        .send(Method::GET, "/v1/threats?severity=Critical", Some(&token), None)
        .await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = app
        .send(Method::GET, "/v1/threats?category=worm", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_only_admins_publish_threats() {
    let app = TestApp::new();
    let advisory = json!({
        "title": "Credential stuffing",
        "description": "Reused passwords tried against login endpoints.",
        "severity": "High",
        "category": "other",
        "affectedSystems": ["Login"]
    });

    let (status, body) = app
        .send(Method::POST, "/v1/threats", Some(&user_token()), Some(advisory.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "FORBIDDEN");

    let admin = token_for(UserId::new(), Some("admin"));
    let (status, created) = app
        .send(Method::POST, "/v1/threats", Some(&admin), Some(advisory))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["isActive"], true);

    let uri = format!("/v1/threats/{}", created["id"].as_str().unwrap());
    let (status, fetched) = app.send(Method::GET, &uri, Some(&user_token()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Credential stuffing");

    let (status, body) = app
        .send(
            Method::POST,
            "/v1/threats",
            Some(&admin),
            Some(json!({ "title": " ", "description": "d" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "title");
}
