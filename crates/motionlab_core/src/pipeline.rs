//! # Pipeline
//!
//! 랜드마크 시퀀스 → 각도 → 구간 → 이상 범위 평가.
//!
//! The store is borrowed, so one loaded [`SportConfigStore`] can back any
//! number of analyzers (and threads).
//!
//! ## 사용법
//! ```rust
//! use motionlab_core::config::{AnalyzerSettings, SportConfigStore};
//! use motionlab_core::models::LandmarkSequence;
//! use motionlab_core::pipeline::MotionAnalyzer;
//!
//! let store = SportConfigStore::embedded().unwrap();
//! let analyzer = MotionAnalyzer::new(&store, &AnalyzerSettings::default());
//!
//! let report = analyzer
//!     .analyze(&LandmarkSequence::new(30.0, vec![]), "GOLF", "DRIVER")
//!     .unwrap();
//! assert!(report.phases.is_empty());
//! assert!(analyzer.analyze(&LandmarkSequence::new(30.0, vec![]), "GOLF", "WEDGE").is_err());
//! ```

use tracing::{debug, info};

use crate::angle::AngleEngine;
use crate::config::{AnalyzerSettings, SportConfig, SportConfigStore};
use crate::error::Result;
use crate::models::{AnalysisReport, LandmarkSequence};
use crate::phase::PhaseDetector;

#[derive(Debug, Clone, Copy)]
pub struct MotionAnalyzer<'a> {
    store: &'a SportConfigStore,
    angles: AngleEngine,
    phases: PhaseDetector,
}

impl<'a> MotionAnalyzer<'a> {
    pub fn new(store: &'a SportConfigStore, settings: &AnalyzerSettings) -> Self {
        Self {
            store,
            angles: AngleEngine::from_settings(settings),
            phases: PhaseDetector::from_settings(settings),
        }
    }

    pub fn store(&self) -> &'a SportConfigStore {
        self.store
    }

    /// Config for a (sport, sub-category) pair, for the feedback stage.
    pub fn config(&self, sport: &str, sub_category: &str) -> Result<&'a SportConfig> {
        Ok(self.store.get(sport, sub_category)?)
    }

    pub fn analyze(
        &self,
        sequence: &LandmarkSequence,
        sport: &str,
        sub_category: &str,
    ) -> Result<AnalysisReport> {
        let config = self.config(sport, sub_category)?;
        debug!(
            sport,
            sub_category,
            frames = sequence.frames.len(),
            fps = sequence.fps,
            "analysis started"
        );

        let angles = self.angles.compute(&sequence.frames, config);
        let phases = self.phases.detect(&angles.per_frame, &config.phases, sequence.fps);
        let assessments = config.assess(&angles.averages);

        info!(
            sport,
            sub_category,
            frames = angles.per_frame.len(),
            phases = phases.len(),
            "analysis finished"
        );

        Ok(AnalysisReport {
            frame_angles: angles.per_frame,
            average_angles: angles.averages,
            phases,
            assessments,
        })
    }

    /// JSON in, report out. Malformed input is a user error.
    pub fn analyze_json(&self, sequence_json: &str, sport: &str, sub_category: &str) -> Result<AnalysisReport> {
        let sequence = LandmarkSequence::from_json(sequence_json)?;
        self.analyze(&sequence, sport, sub_category)
    }
}
