//! Terrain path profile and link budget analysis for point-to-point radio links.
//!
//! [`profile::analyze`] is the entry point: it takes a terrain profile between
//! two stations and reports line-of-sight and Fresnel-zone clearance, the link
//! budget in both directions, and a decimated series for plotting.

pub mod geodesy;
pub mod link;
pub mod profile;
pub mod rf;
pub mod terrain;
pub mod web;

pub use profile::{analyze, AnalysisError, AnalysisOptions, AnalysisResult, StationParameters};
