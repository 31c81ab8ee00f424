//! HTTP handlers over the intensity engine and enhancer

use crate::api::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use solo_composer::{Enhancement, EnhancementRequest};
use solo_engine::{Catalog, PhaseComparison, ProfileReport, DEFAULT_COMPARISON_LEVEL};
use solo_types::MonkPrinciple;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub tools: usize,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
        started_at: state.started_at,
        tools: state.mcp.list_tools().len(),
    })
}

/// Every foundation and phase in catalog order
pub async fn list_catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(state.engine.list_catalog())
}

/// Body of `POST /profile`
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileRequest {
    pub harmonic_foundation: String,
    pub solo_phase: String,
    pub intensity_level: i64,
}

/// Validated profile with its repair notes
pub async fn get_profile(
    State(state): State<AppState>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> ApiResult<Json<ProfileReport>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let report = state.engine.get_profile(
        &request.harmonic_foundation,
        &request.solo_phase,
        request.intensity_level,
    )?;

    Ok(Json(report))
}

/// Prompt enhancement
pub async fn enhance_prompt(
    State(state): State<AppState>,
    payload: Result<Json<EnhancementRequest>, JsonRejection>,
) -> ApiResult<Json<Enhancement>> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(Json(state.enhancer.enhance(&request)?))
}

/// Query of `GET /compare/:foundation`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareQuery {
    pub intensity_level: Option<i64>,
}

/// One foundation across all three phases
pub async fn compare_phases(
    State(state): State<AppState>,
    Path(foundation): Path<String>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> ApiResult<Json<PhaseComparison>> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let level = query
        .intensity_level
        .unwrap_or(i64::from(DEFAULT_COMPARISON_LEVEL));

    Ok(Json(state.engine.compare_phases(&foundation, level)?))
}

/// Monk principles response
#[derive(Debug, Serialize)]
pub struct PrinciplesResponse {
    pub principles: Vec<MonkPrinciple>,
}

pub async fn monk_principles(State(state): State<AppState>) -> Json<PrinciplesResponse> {
    Json(PrinciplesResponse {
        principles: state.engine.monk_principles(),
    })
}
