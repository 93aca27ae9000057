use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::geodesy::{sample_path, Coordinates, PathSamples};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SamplesQuery {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
    /// Spacing between samples in meters.
    #[serde(default)]
    pub step_m: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/api/path/samples",
    params(SamplesQuery),
    responses(
        (status = 200, description = "Sample locations along the path", body = PathSamples),
        (status = 400, description = "Invalid parameters", body = ErrorResponse)
    ),
    tag = "analysis"
)]
pub async fn samples(
    State(state): State<AppState>,
    Query(query): Query<SamplesQuery>,
) -> ApiResult<Json<PathSamples>> {
    let sampling = &state.config.sampling;
    let samples = sample_path(
        Coordinates::new(query.lat1, query.lon1),
        Coordinates::new(query.lat2, query.lon2),
        query.step_m.unwrap_or(sampling.step_m),
        Some(sampling.max_points),
    )?;
    Ok(Json(samples))
}
