//! Typed sport configuration.
//!
//! Built from the raw file structs in [`super::file`] and validated once, so
//! analysis code never sees a missing key or an unregistered calculator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::models::{AngleAssessment, AssessmentStatus};

/// 특수 계산기 (3점 꼭짓점 각도로 표현할 수 없는 각도)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SpecialCalculator {
    /// Shoulder line vs hip line rotation ("X-Factor").
    HipShoulderSeparation,
}

impl SpecialCalculator {
    pub const ALL: [SpecialCalculator; 1] = [SpecialCalculator::HipShoulderSeparation];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            SpecialCalculator::HipShoulderSeparation => "hip_shoulder_separation",
        }
    }
}

/// How an angle is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleKind {
    /// Vertex angle at `points[1]`.
    ThreePoint { points: [String; 3] },
    Special(SpecialCalculator),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

impl IdealRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn assess(&self, angle: &str, value: f64) -> AngleAssessment {
        let (status, deviation) = if value < self.min {
            (AssessmentStatus::Below, self.min - value)
        } else if value > self.max {
            (AssessmentStatus::Above, value - self.max)
        } else {
            (AssessmentStatus::Within, 0.0)
        };
        AngleAssessment {
            angle: angle.to_string(),
            value,
            ideal_min: self.min,
            ideal_max: self.max,
            status,
            deviation: (deviation * 10.0).round() / 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleDefinition {
    pub name: String,
    pub kind: AngleKind,
    pub ideal_range: IdealRange,
    #[serde(default)]
    pub description: String,
}

impl AngleDefinition {
    pub fn three_point(name: &str, points: [&str; 3], ideal_range: (f64, f64)) -> Self {
        Self {
            name: name.to_string(),
            kind: AngleKind::ThreePoint {
                points: points.map(str::to_string),
            },
            ideal_range: IdealRange {
                min: ideal_range.0,
                max: ideal_range.1,
            },
            description: String::new(),
        }
    }

    pub fn special(name: &str, calculator: SpecialCalculator, ideal_range: (f64, f64)) -> Self {
        Self {
            name: name.to_string(),
            kind: AngleKind::Special(calculator),
            ideal_range: IdealRange {
                min: ideal_range.0,
                max: ideal_range.1,
            },
            description: String::new(),
        }
    }

    /// Landmark names for three-point angles, `None` for special calculators.
    pub fn points(&self) -> Option<&[String; 3]> {
        match &self.kind {
            AngleKind::ThreePoint { points } => Some(points),
            AngleKind::Special(_) => None,
        }
    }
}

/// 구간 감지 규칙 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DetectionRule {
    VelocityThreshold,
    AngleIncrease,
    AngleDecrease,
    AngleMax,
    AngleMin,
    Stabilization,
    AngleRange,
}

impl DetectionRule {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionRule::VelocityThreshold => "velocity_threshold",
            DetectionRule::AngleIncrease => "angle_increase",
            DetectionRule::AngleDecrease => "angle_decrease",
            DetectionRule::AngleMax => "angle_max",
            DetectionRule::AngleMin => "angle_min",
            DetectionRule::Stabilization => "stabilization",
            DetectionRule::AngleRange => "angle_range",
        }
    }
}

fn default_emit_phase() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// Rule parameters. Which fields are required depends on the rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PhaseParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_increase: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// `false` keeps the rule as an anchor without emitting a phase for it.
    #[serde(default = "default_emit_phase", skip_serializing_if = "is_true")]
    pub emit_phase: bool,
}

impl PhaseParams {
    /// Largest accepted `window_size`, in frames.
    pub const MAX_WINDOW_SIZE: usize = 1_000;
}

impl Default for PhaseParams {
    fn default() -> Self {
        Self {
            window_size: None,
            threshold: None,
            variance_threshold: None,
            min_increase: None,
            min: None,
            max: None,
            emit_phase: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PhaseRule {
    pub name: String,
    pub detection_rule: DetectionRule,
    pub target_angle: String,
    #[serde(default)]
    pub params: PhaseParams,
}

impl PhaseRule {
    pub fn new(name: &str, detection_rule: DetectionRule, target_angle: &str) -> Self {
        Self {
            name: name.to_string(),
            detection_rule,
            target_angle: target_angle.to_string(),
            params: PhaseParams::default(),
        }
    }

    pub fn with_params(mut self, params: PhaseParams) -> Self {
        self.params = params;
        self
    }

    pub(crate) fn validate(
        &self,
        location: &str,
        angles: &BTreeMap<String, AngleDefinition>,
    ) -> Result<(), ConfigError> {
        if !angles.contains_key(&self.target_angle) {
            return Err(ConfigError::UnknownTargetAngle {
                location: location.to_string(),
                phase: self.name.clone(),
                angle: self.target_angle.clone(),
            });
        }

        let params = &self.params;
        match self.detection_rule {
            DetectionRule::VelocityThreshold => {
                self.require_window(location)?;
                let threshold = self.require(location, "threshold", params.threshold)?;
                self.require_finite(location, "threshold", threshold)?;
            }
            DetectionRule::Stabilization => {
                self.require_window(location)?;
                let v = self.require(location, "variance_threshold", params.variance_threshold)?;
                if !(v.is_finite() && v > 0.0) {
                    return Err(self.invalid(location, "variance_threshold", "must be > 0"));
                }
            }
            DetectionRule::AngleRange => {
                let min = self.require(location, "min", params.min)?;
                let max = self.require(location, "max", params.max)?;
                self.require_finite(location, "min", min)?;
                self.require_finite(location, "max", max)?;
                if min > max {
                    return Err(self.invalid(location, "min", &format!("{} > max {}", min, max)));
                }
            }
            DetectionRule::AngleMax | DetectionRule::AngleMin => {
                if let Some(w) = params.window_size {
                    self.check_window(location, w, 0)?;
                }
            }
            DetectionRule::AngleIncrease | DetectionRule::AngleDecrease => {}
        }
        Ok(())
    }

    fn require<T: Copy>(
        &self,
        location: &str,
        param: &'static str,
        value: Option<T>,
    ) -> Result<T, ConfigError> {
        value.ok_or_else(|| ConfigError::MissingParam {
            location: location.to_string(),
            phase: self.name.clone(),
            param,
        })
    }

    fn require_window(&self, location: &str) -> Result<usize, ConfigError> {
        let w = self.require(location, "window_size", self.params.window_size)?;
        self.check_window(location, w, 1)?;
        Ok(w)
    }

    fn check_window(&self, location: &str, w: usize, min: usize) -> Result<(), ConfigError> {
        if (min..=PhaseParams::MAX_WINDOW_SIZE).contains(&w) {
            Ok(())
        } else {
            Err(self.invalid(
                location,
                "window_size",
                &format!("must be in {}..={}", min, PhaseParams::MAX_WINDOW_SIZE),
            ))
        }
    }

    fn require_finite(
        &self,
        location: &str,
        param: &'static str,
        value: f64,
    ) -> Result<(), ConfigError> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(self.invalid(location, param, "must be finite"))
        }
    }

    fn invalid(&self, location: &str, param: &'static str, reason: &str) -> ConfigError {
        ConfigError::InvalidParam {
            location: location.to_string(),
            phase: self.name.clone(),
            param,
            reason: reason.to_string(),
        }
    }
}

/// 종목 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SportConfig {
    pub angles: BTreeMap<String, AngleDefinition>,
    pub phases: Vec<PhaseRule>,
}

impl SportConfig {
    pub fn new(angles: Vec<AngleDefinition>, phases: Vec<PhaseRule>) -> Self {
        Self {
            angles: angles.into_iter().map(|a| (a.name.clone(), a)).collect(),
            phases,
        }
    }

    pub fn angle(&self, name: &str) -> Option<&AngleDefinition> {
        self.angles.get(name)
    }

    /// Ideal-range assessment for every averaged angle this config defines.
    pub fn assess(&self, averages: &BTreeMap<String, f64>) -> Vec<AngleAssessment> {
        averages
            .iter()
            .filter_map(|(name, &value)| {
                self.angles
                    .get(name)
                    .map(|def| def.ideal_range.assess(name, value))
            })
            .collect()
    }
}
