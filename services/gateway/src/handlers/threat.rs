use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::AdvisoryParams;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use types::advisory::{NewAdvisory, ThreatAdvisory};
use types::ids::AdvisoryId;

pub async fn list_threats(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<AdvisoryParams>,
) -> Result<Json<Vec<ThreatAdvisory>>, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:threats", user.user_id))?;

    let filter = params.into_filter()?;
    Ok(Json(state.advisories.list(&filter)))
}

pub async fn get_threat(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<ThreatAdvisory>, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:threats", user.user_id))?;

    let id: AdvisoryId = id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid advisory id '{id}'")))?;
    state
        .advisories
        .get(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("advisory {id}")))
}

pub async fn create_threat(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<NewAdvisory>,
) -> Result<(StatusCode, Json<ThreatAdvisory>), AppError> {
    user.require_admin()?;

    let advisory = ThreatAdvisory::publish(payload, state.clock.now()).map_err(|field| {
        AppError::Validation {
            field,
            message: format!("{field} must not be blank"),
        }
    })?;
    state.advisories.insert(advisory.clone());

    tracing::info!(
        advisory_id = %advisory.id,
        severity = %advisory.severity,
        published_by = %user.user_id,
        "threat advisory published"
    );

    Ok((StatusCode::CREATED, Json(advisory)))
}
