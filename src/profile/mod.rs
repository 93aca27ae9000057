mod analysis;
mod decimate;
mod error;
mod scanner;
mod types;

pub use analysis::{analyze, AnalysisResult, AntennaSite, Marker, PlotPayload};
pub use decimate::decimate;
pub use error::{AnalysisError, ErrorKind};
pub use scanner::{scan, Obstruction, ScanOutcome, ScanParams};
pub use types::{
    AnalysisOptions, GeoPoint, Station, StationParameters, ZoneFraction,
    DEFAULT_DECIMATE_TARGET, DEFAULT_RX_SENSITIVITY_DBM,
};
