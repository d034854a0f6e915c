use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::analysis::{AnalysisCategory, guidance_for};
use shared::models::{AnalysisRequest, AnalysisResponse};
use shared::store::NewAnalysis;
use tracing::info;

use super::AppState;
use super::errors::store_error_response;

pub(super) async fn analyze_dockerfile(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Response {
    let guidance = guidance_for(AnalysisCategory::from_tag(&req.analysis_type));
    let recommendations: Vec<String> = guidance
        .recommendations
        .iter()
        .map(ToString::to_string)
        .collect();

    let record = match state
        .store
        .record_analysis(NewAnalysis {
            analysis_type: req.analysis_type.clone(),
            recommendations: recommendations.clone(),
            score: guidance.score,
        })
        .await
    {
        Ok(record) => record,
        Err(err) => return store_error_response(err),
    };

    info!(
        analysis_id = %record.id,
        analysis_type = %record.analysis_type,
        "analysis recorded"
    );

    (
        StatusCode::OK,
        Json(AnalysisResponse {
            analysis_type: req.analysis_type,
            recommendations,
            score: guidance.score,
            details: Some(format!(
                "Analysis completed with {} recommendations",
                guidance.recommendations.len()
            )),
        }),
    )
        .into_response()
}
