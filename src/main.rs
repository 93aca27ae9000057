use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use path_o_mat::geodesy::{sample_path, Coordinates};
use path_o_mat::link::LinkPlan;
use path_o_mat::profile::{AnalysisResult, Obstruction};
use path_o_mat::rf::{LinkBudget, LinkQuality};
use path_o_mat::terrain::DEFAULT_STEP_M;
use path_o_mat::web::{self, Config};

#[derive(Parser)]
#[command(name = "path-o-mat")]
#[command(about = "Point-to-point radio path analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a link plan file
    Validate { plan: String },
    /// Analyze a link plan and print a JSON report
    Analyze {
        plan: String,
        /// Print the whole analysis including every series
        #[arg(long)]
        full: bool,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print sample locations between two points as JSON
    Sample {
        /// Start as "lat,lon"
        #[arg(long)]
        from: String,
        /// End as "lat,lon"
        #[arg(long)]
        to: String,
        /// Spacing in meters
        #[arg(long, default_value_t = DEFAULT_STEP_M)]
        step: f64,
        #[arg(long)]
        max_points: Option<usize>,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { plan } => validate(&plan),
        Commands::Analyze {
            plan,
            full,
            compact,
        } => run_analysis(&plan, full, compact),
        Commands::Sample {
            from,
            to,
            step,
            max_points,
        } => sample(&from, &to, step, max_points),
        Commands::Serve { config } => serve(config.as_deref()),
    }
}

fn validate(path: &str) -> ExitCode {
    let plan = match LinkPlan::load(Path::new(path)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Plan error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let profile = match plan.resolve_profile() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Profile error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Plan is valid ({} profile samples)", profile.len());
    for (label, station) in [("near", &plan.near), ("far", &plan.far)] {
        println!(
            "  {}: {} @ {} m AGL, {} MHz, {} W",
            label,
            station.name.as_deref().unwrap_or("-"),
            station.height_agl_m,
            station.frequency_mhz,
            station.tx_power_w
        );
    }
    println!(
        "  options: fresnel {} / k {:.3} / smoothing {}",
        f64::from(plan.options.fresnel_zone),
        plan.options.k_factor,
        plan.options.smoothing
    );
    ExitCode::SUCCESS
}

#[derive(Serialize)]
struct Summary<'a> {
    total_distance_m: f64,
    frequency_mhz: f64,
    los_clear: bool,
    fresnel_clear: bool,
    link_quality: LinkQuality,
    worst_los: &'a Obstruction,
    worst_fresnel: &'a Obstruction,
    forward: &'a LinkBudget,
    reverse: &'a LinkBudget,
}

impl<'a> From<&'a AnalysisResult> for Summary<'a> {
    fn from(r: &'a AnalysisResult) -> Self {
        Summary {
            total_distance_m: r.total_distance_m,
            frequency_mhz: r.frequency_mhz,
            los_clear: r.los_clear,
            fresnel_clear: r.fresnel_clear,
            link_quality: r.link_quality,
            worst_los: &r.worst_los,
            worst_fresnel: &r.worst_fresnel,
            forward: &r.forward,
            reverse: &r.reverse,
        }
    }
}

/// `summary` by default, the whole `analysis` with `--full`.
#[derive(Serialize)]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    plan: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<&'a AnalysisResult>,
}

impl<'a> Report<'a> {
    fn new(plan: Option<&'a str>, result: &'a AnalysisResult, full: bool) -> Self {
        Report {
            generated_at: Utc::now(),
            plan,
            summary: (!full).then(|| Summary::from(result)),
            analysis: full.then_some(result),
        }
    }
}

fn run_analysis(path: &str, full: bool, compact: bool) -> ExitCode {
    let plan = match LinkPlan::load(Path::new(path)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Plan error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match plan.analyze() {
        Ok(r) => r,
        Err(e) => {
            log::error!("Analysis of {} failed: {}", path, e);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "{}: {:.0} m, link quality {}",
        plan.name.as_deref().unwrap_or(path),
        result.total_distance_m,
        result.link_quality
    );

    let report = Report::new(plan.name.as_deref(), &result, full);
    match to_json(&report, compact) {
        Ok(s) => {
            println!("{}", s);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn sample(from: &str, to: &str, step: f64, max_points: Option<usize>) -> ExitCode {
    let (Some(from), Some(to)) = (Coordinates::from_pair(from), Coordinates::from_pair(to)) else {
        eprintln!("Coordinates must be given as \"lat,lon\"");
        return ExitCode::FAILURE;
    };

    let samples = match sample_path(from, to, step, max_points) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Sampling error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match to_json(&samples, false) {
        Ok(s) => {
            println!("{}", s);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn serve(config_path: Option<&str>) -> ExitCode {
    let config = match config_path.map(Config::from_file).transpose() {
        Ok(c) => c.unwrap_or_default(),
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use path_o_mat::geodesy::GeoPoint;
    use path_o_mat::profile::{analyze, AnalysisOptions, StationParameters};

    fn flat_result() -> AnalysisResult {
        let profile: Vec<GeoPoint> = (0..11)
            .map(|i| GeoPoint::new(0.0, i as f64 * 0.001, 0.0))
            .collect();
        let station = StationParameters {
            name: None,
            height_agl_m: 10.0,
            frequency_mhz: 915.0,
            tx_power_w: 1.0,
            antenna_gain_dbi: 0.0,
            rx_sensitivity_dbm: -100.0,
            cable_loss_db: 0.0,
        };
        analyze(&profile, &station, &station, &AnalysisOptions::default()).unwrap()
    }

    #[test]
    fn report_carries_summary_by_default() {
        let result = flat_result();
        let json = serde_json::to_value(Report::new(Some("ridge"), &result, false)).unwrap();
        assert_eq!(json["plan"], "ridge");
        assert!(json.get("generated_at").is_some());
        assert_eq!(json["summary"]["los_clear"], true);
        assert!(json.get("analysis").is_none());
    }

    #[test]
    fn full_report_carries_analysis() {
        let result = flat_result();
        let json = serde_json::to_value(Report::new(None, &result, true)).unwrap();
        assert!(json["plan"].is_null());
        assert!(json.get("summary").is_none());
        assert!(json["analysis"]["distances_m"].is_array());
    }
}
