use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::constants::REGRISK_STATUS_HEADER;
use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use crate::model::{CompanyProfile, Regulation};
use crate::narrative::{IndicatorExtraction, IndicatorSummary, generate_indicators};
use crate::report::{RiskReport, build_report};
use crate::scoring::{RankedRegulation, ScoreResult};
use crate::storage::{AnalysisRecord, PersistSummary, persist_ranking};

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub regulation: Regulation,
    #[serde(default)]
    pub profile: Option<CompanyProfile>,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub regulations: Option<Vec<Regulation>>,
    #[serde(default)]
    pub profile: Option<CompanyProfile>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub ranked: Vec<RankedRegulation>,
    pub persisted: PersistSummary,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub regulations: Option<Vec<Regulation>>,
    #[serde(default)]
    pub profile: Option<CompanyProfile>,
    /// Ask the configured generator for indicators as well.
    #[serde(default)]
    pub narrative: bool,
}

#[derive(Debug, Serialize)]
pub struct NarrativeSection {
    pub model: String,
    #[serde(flatten)]
    pub extraction: IndicatorExtraction,
    pub summary: IndicatorSummary,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: RiskReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<NarrativeSection>,
}

/// Decodes a JSON body, reporting schema errors as [`GatewayError::InvalidRequest`].
pub(crate) fn parse_body<T: DeserializeOwned>(body: serde_json::Value) -> Result<T, GatewayError> {
    serde_json::from_value(body)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {e}")))
}

fn resolve_profile(
    state: &HandlerState,
    profile: Option<CompanyProfile>,
) -> Result<Arc<CompanyProfile>, GatewayError> {
    match profile {
        Some(profile) => Ok(Arc::new(profile)),
        None => state
            .default_profile
            .clone()
            .ok_or(GatewayError::MissingDefault("company profile")),
    }
}

fn resolve_regulations(
    state: &HandlerState,
    regulations: Option<Vec<Regulation>>,
) -> Result<Arc<Vec<Regulation>>, GatewayError> {
    let regulations = match regulations {
        Some(regulations) => Arc::new(regulations),
        None if state.default_regulations.is_empty() => {
            return Err(GatewayError::MissingDefault("regulations"));
        }
        None => state.default_regulations.clone(),
    };

    if let Some(index) = regulations.iter().position(|r| r.id.is_empty()) {
        return Err(GatewayError::InvalidRequest(format!(
            "regulation at index {index} has no id"
        )));
    }

    Ok(regulations)
}

fn with_status(body: impl Serialize, status: &'static str) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(REGRISK_STATUS_HEADER, HeaderValue::from_static(status));
    (headers, Json(body)).into_response()
}

#[instrument(skip(state, body))]
pub async fn score_handler(
    State(state): State<HandlerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: ScoreRequest = parse_body(body)?;
    let profile = resolve_profile(&state, request.profile)?;

    let score: ScoreResult = state.scorer.score(&request.regulation, &profile);
    debug!(
        regulation_id = %request.regulation.id,
        total_score = score.total_score,
        "Scored single regulation"
    );

    Ok(with_status(score, "scored"))
}

#[instrument(skip(state, body))]
pub async fn rank_handler(
    State(state): State<HandlerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: RankRequest = parse_body(body)?;
    let profile = resolve_profile(&state, request.profile)?;
    let regulations = resolve_regulations(&state, request.regulations)?;

    let ranked = state.scorer.rank(&regulations, &profile);

    let store = state.store.clone();
    let to_persist = ranked.clone();
    let persisted = tokio::task::spawn_blocking(move || {
        persist_ranking(store.as_ref(), &to_persist, &profile)
    })
    .await
    .map_err(|e| GatewayError::InternalError(format!("persist task failed: {e}")))??;

    info!(
        regulations = ranked.len(),
        created = persisted.created,
        updated = persisted.updated,
        "Ranked and persisted"
    );

    Ok(with_status(RankResponse { ranked, persisted }, "ranked"))
}

#[instrument(skip(state))]
pub async fn list_analyses_handler(
    State(state): State<HandlerState>,
) -> Result<Response, GatewayError> {
    let store = state.store.clone();
    let records: Vec<AnalysisRecord> = tokio::task::spawn_blocking(move || store.list())
        .await
        .map_err(|e| GatewayError::InternalError(format!("list task failed: {e}")))??;

    Ok(with_status(records, "ok"))
}

#[instrument(skip(state))]
pub async fn get_analysis_handler(
    State(state): State<HandlerState>,
    Path(regulation_id): Path<String>,
) -> Result<Response, GatewayError> {
    let store = state.store.clone();
    let id = regulation_id.clone();
    let record = tokio::task::spawn_blocking(move || store.get(&id))
        .await
        .map_err(|e| GatewayError::InternalError(format!("lookup task failed: {e}")))??;

    match record {
        Some(record) => Ok(with_status(record, "ok")),
        None => Err(GatewayError::NotFound(regulation_id)),
    }
}

#[instrument(skip(state, body))]
pub async fn report_handler(
    State(state): State<HandlerState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: ReportRequest = parse_body(body)?;
    let profile = resolve_profile(&state, request.profile)?;
    let regulations = resolve_regulations(&state, request.regulations)?;

    let ranked = state.scorer.rank(&regulations, &profile);
    let report = build_report(&ranked, &profile);

    let narrative = if request.narrative {
        let narrator = state
            .narrator
            .clone()
            .ok_or(GatewayError::MissingDefault("narrative generator"))?;

        let extraction =
            generate_indicators(narrator.as_ref(), &report, &profile, &regulations).await?;
        if let Some(reason) = &extraction.error {
            warn!(run_id = %report.run_id, reason = %reason, "Narrative output not decodable");
        }

        Some(NarrativeSection {
            model: narrator.model_name().to_string(),
            summary: extraction.summary(),
            extraction,
        })
    } else {
        None
    };

    Ok(with_status(ReportResponse { report, narrative }, "reported"))
}
