use utoipa::OpenApi;

use super::api::analyze::AnalyzeRequest;
use super::api::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(super::api::analyze::analyze, super::api::sampling::samples),
    components(
        schemas(
            AnalyzeRequest,
            ErrorResponse,
            crate::geodesy::Coordinates,
            crate::geodesy::GeoPoint,
            crate::geodesy::PathSamples,
            crate::profile::AnalysisOptions,
            crate::profile::AnalysisResult,
            crate::profile::StationParameters,
            crate::rf::LinkQuality,
        )
    ),
    info(
        title = "Path-O-Mat API",
        description = "Terrain path profile and link budget analysis",
        version = "0.1.0"
    ),
    tags(
        (name = "analysis", description = "Path profile analysis")
    )
)]
pub struct ApiDoc;
