use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::geodesy::GeoPoint;
use crate::profile::{
    analyze as run_analysis, AnalysisOptions, AnalysisResult, StationParameters,
};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    pub profile: Vec<GeoPoint>,
    pub near: StationParameters,
    pub far: StationParameters,
    /// Falls back to the server's configured options.
    #[serde(default)]
    pub options: Option<AnalysisOptions>,
}

#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Path analysis", body = AnalysisResult),
        (status = 400, description = "Invalid input or degenerate geometry", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalysisResult>> {
    let options = request
        .options
        .unwrap_or_else(|| state.config.analysis.clone());

    let result = run_analysis(&request.profile, &request.near, &request.far, &options)
        .inspect_err(|e| log::debug!("rejected analysis request: {}", e))?;

    Ok(Json(result))
}
