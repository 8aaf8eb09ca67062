use crate::handlers::{assessment, health, threat};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/assessments",
            post(assessment::create_assessment).get(assessment::list_assessments),
        )
        .route("/assessments/preview", post(assessment::preview_assessment))
        .route("/assessments/stats/summary", get(assessment::assessment_stats))
        .route(
            "/assessments/{id}",
            get(assessment::get_assessment)
                .put(assessment::update_assessment)
                .delete(assessment::delete_assessment),
        )
        .route(
            "/threats",
            get(threat::list_threats).post(threat::create_threat),
        )
        .route("/threats/{id}", get(threat::get_threat));

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .nest("/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
