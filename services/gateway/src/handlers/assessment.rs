use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{AssessmentPage, AssessmentRequest, ListParams, PreviewResponse};
use crate::notify;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use risk_engine::normalizer::SubmissionForm;
use types::assessment::Assessment;
use types::ids::AssessmentId;
use types::stats::AssessmentStats;

fn parse_id(raw: &str) -> Result<AssessmentId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid assessment id '{raw}'")))
}

fn not_found(id: &AssessmentId) -> AppError {
    AppError::NotFound(format!("assessment {id}"))
}

pub async fn create_assessment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<AssessmentRequest>,
) -> Result<(StatusCode, Json<Assessment>), AppError> {
    // 1. Rate limiting
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:assessments", user.user_id))?;

    // 2. Normalize and score; nothing is stored on failure
    let policy = payload.policy.unwrap_or(state.config.default_policy);
    let (input, result) = state.engine.assess_raw(payload.form, policy)?;

    // 3. Persist
    let assessment = Assessment::new(user.user_id, input, result, state.clock.now());
    state.repository.insert(assessment.clone()).await?;

    tracing::info!(
        assessment_id = %assessment.id,
        owner = %user.user_id,
        policy = %policy,
        score = assessment.result.score.value(),
        risk_level = %assessment.result.risk_level,
        "assessment created"
    );

    // 4. Notify
    let events = state.engine.events_for(&assessment);
    notify::dispatch(state.notifier.as_ref(), &events).await;

    Ok((StatusCode::CREATED, Json(assessment)))
}

pub async fn list_assessments(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<ListParams>,
) -> Result<Json<AssessmentPage>, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:assessments", user.user_id))?;

    let query = params.into_query()?;
    let page = state.repository.list(&user.user_id, &query).await?;
    Ok(Json(page.into()))
}

pub async fn get_assessment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<Assessment>, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:assessments", user.user_id))?;

    let id = parse_id(&id)?;
    let assessment = state
        .repository
        .get(&user.user_id, &id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(assessment))
}

/// Partial update: supplied fields overlay the stored answers and the
/// whole pipeline re-runs
pub async fn update_assessment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(payload): Json<AssessmentRequest>,
) -> Result<Json<Assessment>, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:assessments", user.user_id))?;

    let id = parse_id(&id)?;
    let mut assessment = state
        .repository
        .get(&user.user_id, &id)
        .await?
        .ok_or_else(|| not_found(&id))?;

    let policy = payload.policy.unwrap_or(assessment.result.policy);
    let merged = SubmissionForm::from(&assessment.input).merge(payload.form);
    let (input, result) = state.engine.assess_raw(merged, policy)?;

    assessment.rescore(input, result, state.clock.now());
    state.repository.update(assessment.clone()).await?;

    tracing::info!(
        assessment_id = %assessment.id,
        score = assessment.result.score.value(),
        risk_level = %assessment.result.risk_level,
        "assessment updated"
    );

    Ok(Json(assessment))
}

pub async fn delete_assessment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:assessments", user.user_id))?;

    let id = parse_id(&id)?;
    if !state.repository.delete(&user.user_id, &id).await? {
        return Err(not_found(&id));
    }

    tracing::info!(assessment_id = %id, owner = %user.user_id, "assessment deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn assessment_stats(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<AssessmentStats>, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:assessments", user.user_id))?;

    let assessments = state.repository.all_for_owner(&user.user_id).await?;
    Ok(Json(AssessmentStats::from_assessments(&assessments)))
}

/// Score without persisting or notifying
pub async fn preview_assessment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<AssessmentRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    state
        .rate_limiter
        .check_rate_limit(&format!("{}:preview", user.user_id))?;

    let policy = payload.policy.unwrap_or(state.config.default_policy);
    let (input, result) = state.engine.assess_raw(payload.form, policy)?;
    Ok(Json(PreviewResponse { input, result }))
}
