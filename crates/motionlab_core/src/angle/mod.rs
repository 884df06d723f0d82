//! # Angle Engine
//!
//! Landmark frames + [`SportConfig`] → per-frame joint angles and per-angle
//! averages.
//!
//! ## 처리 흐름
//! 1. 각도 정의마다 계산 계획 수립 (이름 → 인덱스 해석은 호출당 한 번)
//! 2. 프레임마다 가시성 게이트 통과한 각도만 계산
//! 3. 각도가 하나도 없는 프레임은 제외
//! 4. 평균 = 값을 낸 프레임들의 평균 (소수점 1자리)
//!
//! ## 사용법
//! ```rust
//! use motionlab_core::angle::AngleEngine;
//! use motionlab_core::config::SportConfigStore;
//!
//! let store = SportConfigStore::embedded().unwrap();
//! let config = store.get("GOLF", "DRIVER").unwrap();
//! let report = AngleEngine::default().compute(&[], config);
//! assert!(report.is_empty());
//! ```

mod geometry;
mod special;

#[cfg(test)]
mod tests;

pub use geometry::{line_orientation, orientation_difference, round1, vertex_angle};

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::config::{
    AnalyzerSettings, AngleKind, AngleSpace, SpecialCalculator, SportConfig,
    DEFAULT_MIN_VISIBILITY,
};
use crate::landmarks;
use crate::models::{AngleReport, Frame, FrameAngles};

/// 각도 하나의 계산 방법 (인덱스 해석 완료)
#[derive(Debug, Clone, Copy)]
enum Calculator {
    Vertex([usize; 3]),
    Special(SpecialCalculator),
}

#[derive(Debug)]
struct PlannedAngle<'a> {
    name: &'a str,
    calculator: Calculator,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleEngine {
    min_visibility: f64,
    space: AngleSpace,
}

impl Default for AngleEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_VISIBILITY, AngleSpace::Planar)
    }
}

impl AngleEngine {
    pub fn new(min_visibility: f64, space: AngleSpace) -> Self {
        Self {
            min_visibility,
            space,
        }
    }

    pub fn from_settings(settings: &AnalyzerSettings) -> Self {
        Self::new(settings.min_visibility, settings.angle_space)
    }

    pub fn min_visibility(&self) -> f64 {
        self.min_visibility
    }

    pub fn space(&self) -> AngleSpace {
        self.space
    }

    /// Compute every configured angle on every frame.
    pub fn compute(&self, frames: &[Frame], config: &SportConfig) -> AngleReport {
        let plan = plan_angles(config);

        let mut per_frame = Vec::with_capacity(frames.len());
        // (sum, count), accumulated in frame order
        let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();

        for frame in frames {
            let angles = self.compute_frame(frame, &plan);
            if angles.is_empty() {
                debug!(frame = frame.frame_index, "no angle computable, frame skipped");
                continue;
            }
            for (name, &value) in &angles {
                let entry = totals.entry(name.clone()).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
            per_frame.push(FrameAngles {
                frame_index: frame.frame_index,
                angles,
            });
        }

        let averages = totals
            .into_iter()
            .map(|(name, (sum, count))| (name, round1(sum / count as f64)))
            .collect();

        info!(
            computed = per_frame.len(),
            total = frames.len(),
            "angle computation finished"
        );

        AngleReport {
            per_frame,
            averages,
        }
    }

    fn compute_frame(&self, frame: &Frame, plan: &[PlannedAngle<'_>]) -> BTreeMap<String, f64> {
        plan.iter()
            .filter_map(|planned| {
                self.evaluate(frame, planned.calculator)
                    .map(|value| (planned.name.to_string(), value))
            })
            .collect()
    }

    fn evaluate(&self, frame: &Frame, calculator: Calculator) -> Option<f64> {
        match calculator {
            Calculator::Vertex([a, b, c]) => {
                let a = frame.visible_point(a, self.min_visibility)?;
                let b = frame.visible_point(b, self.min_visibility)?;
                let c = frame.visible_point(c, self.min_visibility)?;
                vertex_angle(a, b, c, self.space)
            }
            Calculator::Special(special) => special.compute(frame, self.min_visibility),
        }
    }
}

/// Resolve landmark names once per call. Angles whose names do not resolve
/// are dropped with a single warning.
fn plan_angles(config: &SportConfig) -> Vec<PlannedAngle<'_>> {
    config
        .angles
        .values()
        .filter_map(|def| {
            let calculator = match &def.kind {
                AngleKind::ThreePoint { points } => {
                    let [a, b, c] = points;
                    match (landmarks::resolve(a), landmarks::resolve(b), landmarks::resolve(c)) {
                        (Some(a), Some(b), Some(c)) => Calculator::Vertex([a, b, c]),
                        _ => {
                            warn!(angle = %def.name, points = ?points, "unknown landmark name, angle skipped");
                            return None;
                        }
                    }
                }
                AngleKind::Special(special) => Calculator::Special(*special),
            };
            Some(PlannedAngle {
                name: &def.name,
                calculator,
            })
        })
        .collect()
}
