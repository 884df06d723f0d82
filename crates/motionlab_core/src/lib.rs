//! # motionlab_core - Deterministic Pose Angle + Motion Phase Engine
//!
//! Turns per-frame pose landmarks (MediaPipe Pose 33-point schema) into joint
//! angles, segments the motion into named phases, and scores the averaged
//! angles against per-sport ideal ranges.
//!
//! ## Features
//! - 100% deterministic (same input = byte-identical output)
//! - Sport definitions as validated YAML data, embedded at compile time
//! - Planar or spatial vertex angles plus special calculators
//! - JSON in / JSON out for the surrounding analysis service

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Loop style - can fix incrementally
#![allow(clippy::needless_range_loop)]

pub mod angle;
pub mod config;
pub mod error;
pub mod landmarks;
pub mod models;
pub mod phase;
pub mod pipeline;

pub use angle::AngleEngine;
pub use config::{AnalyzerSettings, SportConfig, SportConfigStore};
pub use error::{AnalysisError, ConfigError, ConfigNotFound, Result};
pub use models::{AnalysisReport, AngleReport, Frame, FrameAngles, LandmarkSequence, Phase, Point};
pub use phase::PhaseDetector;
pub use pipeline::MotionAnalyzer;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
