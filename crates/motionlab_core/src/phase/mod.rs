//! # Phase Segmentation Engine
//!
//! Per-frame angles + ordered [`PhaseRule`]s → named frame ranges.
//!
//! ## 처리 흐름
//! 1. 규칙의 target_angle 마다 시계열 생성 (zero-order hold)
//! 2. 앵커 규칙을 순서대로 탐색 (이전 앵커부터 시작)
//! 3. 규칙 순서대로 구간 조립, `emit_phase: false` 규칙은 앵커로만 사용
//!
//! Phase boundaries are positions in the `frame_angles` series, not the
//! extractor's `frame_index` values.
//!
//! ## 사용법
//! ```rust
//! use motionlab_core::config::PhaseWindowPolicy;
//! use motionlab_core::phase::PhaseDetector;
//!
//! let detector = PhaseDetector::new(PhaseWindowPolicy::Fixed);
//! assert!(detector.detect(&[], &[], 30.0).is_empty());
//! ```

mod assembly;
mod rules;
mod series;


pub use rules::{angle_max, angle_min, stabilization, velocity_threshold};
pub use series::extract_series;

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::config::{usable_fps, AnalyzerSettings, PhaseRule, PhaseWindowPolicy, DEFAULT_FPS};
use crate::models::{FrameAngles, Phase};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseDetector {
    window_policy: PhaseWindowPolicy,
    default_fps: f64,
}

impl Default for PhaseDetector {
    fn default() -> Self {
        Self::new(PhaseWindowPolicy::Fixed)
    }
}

impl PhaseDetector {
    pub fn new(window_policy: PhaseWindowPolicy) -> Self {
        Self {
            window_policy,
            default_fps: DEFAULT_FPS,
        }
    }

    pub fn from_settings(settings: &AnalyzerSettings) -> Self {
        Self {
            window_policy: settings.top_window,
            default_fps: settings.default_fps,
        }
    }

    pub fn window_policy(&self) -> PhaseWindowPolicy {
        self.window_policy
    }

    /// Segment `frame_angles` with `rules`.
    ///
    /// Returns an empty list when there is nothing to segment: no frames, no
    /// rules, or a target angle that never took a non-zero value.
    pub fn detect(&self, frame_angles: &[FrameAngles], rules: &[PhaseRule], fps: f64) -> Vec<Phase> {
        if frame_angles.is_empty() {
            warn!("no frame angles, phase detection skipped");
            return Vec::new();
        }
        if rules.is_empty() {
            warn!("no phase rules, phase detection skipped");
            return Vec::new();
        }

        let fps = usable_fps(fps).unwrap_or_else(|| {
            warn!(fps, fallback = self.default_fps, "invalid fps, using default");
            self.default_fps
        });

        let mut series: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for rule in rules {
            let angle = rule.target_angle.as_str();
            if series.contains_key(angle) {
                continue;
            }
            let values = extract_series(frame_angles, angle);
            if values.iter().all(|&v| v == 0.0) {
                warn!(angle, "target angle has no values, phase detection skipped");
                return Vec::new();
            }
            series.insert(angle, values);
        }

        let len = frame_angles.len();
        let anchors = assembly::find_anchors(rules, &series);
        let half_widths: Vec<usize> = rules
            .iter()
            .map(|r| self.window_policy.half_width(r.params.window_size, fps))
            .collect();
        let spans = assembly::assemble(rules, &anchors, &half_widths, &series, len);

        let phases: Vec<Phase> = rules
            .iter()
            .zip(spans)
            .filter(|(rule, _)| rule.params.emit_phase)
            .map(|(rule, (start, end))| Phase {
                name: rule.name.clone(),
                start_frame: start,
                end_frame: end,
                duration_ms: frames_to_ms(end - start, fps),
            })
            .collect();

        info!(phases = phases.len(), frames = len, "phase detection finished");
        phases
    }
}

/// `round(frames / fps * 1000)`
fn frames_to_ms(frames: usize, fps: f64) -> u64 {
    (frames as f64 / fps * 1000.0).round() as u64
}
