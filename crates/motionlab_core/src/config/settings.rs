//! # Analyzer Settings
//!
//! 엔진 튜닝 값 (가시성 임계값, 기본 fps, 각도 공간, top 윈도우 정책).
//!
//! ## 사용법
//! ```rust
//! use motionlab_core::config::{AnalyzerSettings, AngleSpace};
//!
//! let settings = AnalyzerSettings::default();
//! assert_eq!(settings.angle_space, AngleSpace::Planar);
//!
//! let spatial = AnalyzerSettings::spatial();
//! assert_eq!(spatial.angle_space, AngleSpace::Spatial);
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use validator::{Validate, ValidationError};

use crate::error::ConfigError;

pub const MIN_VISIBILITY_ENV: &str = "MOTIONLAB_MIN_VISIBILITY";
pub const DEFAULT_FPS_ENV: &str = "MOTIONLAB_DEFAULT_FPS";
pub const SPORTS_CONFIG_ENV: &str = "MOTIONLAB_SPORTS_CONFIG";

pub const DEFAULT_MIN_VISIBILITY: f64 = 0.5;
pub const DEFAULT_FPS: f64 = 24.0;

/// Coordinates used by the vertex-angle formula. One space per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleSpace {
    /// x, y only
    #[default]
    Planar,
    /// x, y, z
    Spatial,
}

/// Half-width of the window phase emitted around an `angle_max` /
/// `angle_min` anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PhaseWindowPolicy {
    /// Rule's `window_size` frames (2 when unset), independent of fps.
    #[default]
    Fixed,
    /// `round(seconds * fps)` frames.
    FpsScaled { seconds: f64 },
}

impl PhaseWindowPolicy {
    pub const DEFAULT_HALF_WIDTH: usize = 2;
    /// Upper bound for `FpsScaled::seconds`.
    pub const MAX_SECONDS: f64 = 10.0;

    /// Half-width in frames for a rule with the given `window_size`.
    pub fn half_width(&self, window_size: Option<usize>, fps: f64) -> usize {
        match *self {
            PhaseWindowPolicy::Fixed => window_size.unwrap_or(Self::DEFAULT_HALF_WIDTH),
            PhaseWindowPolicy::FpsScaled { seconds } => {
                let frames = (seconds * fps).round();
                if frames.is_finite() && frames > 0.0 {
                    frames as usize
                } else {
                    0
                }
            }
        }
    }
}

/// `fps` when it is finite and positive.
pub fn usable_fps(fps: f64) -> Option<f64> {
    (fps.is_finite() && fps > 0.0).then_some(fps)
}

fn validate_top_window(policy: &PhaseWindowPolicy) -> Result<(), ValidationError> {
    match *policy {
        PhaseWindowPolicy::Fixed => Ok(()),
        PhaseWindowPolicy::FpsScaled { seconds }
            if seconds.is_finite() && (0.0..=PhaseWindowPolicy::MAX_SECONDS).contains(&seconds) =>
        {
            Ok(())
        }
        PhaseWindowPolicy::FpsScaled { .. } => Err(ValidationError::new("top_window_seconds")),
    }
}

fn default_min_visibility() -> f64 {
    DEFAULT_MIN_VISIBILITY
}

fn default_fps() -> f64 {
    DEFAULT_FPS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AnalyzerSettings {
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_min_visibility")]
    pub min_visibility: f64,
    /// Used when the caller's fps is missing or not positive.
    #[validate(range(min = 1.0, max = 1000.0))]
    #[serde(default = "default_fps")]
    pub default_fps: f64,
    #[serde(default)]
    pub angle_space: AngleSpace,
    #[validate(custom = "validate_top_window")]
    #[serde(default)]
    pub top_window: PhaseWindowPolicy,
    /// External sports config; the embedded one is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sports_config_path: Option<PathBuf>,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            min_visibility: DEFAULT_MIN_VISIBILITY,
            default_fps: DEFAULT_FPS,
            angle_space: AngleSpace::Planar,
            top_window: PhaseWindowPolicy::Fixed,
            sports_config_path: None,
        }
    }
}

impl AnalyzerSettings {
    /// 3D 각도 (z 포함)
    pub fn spatial() -> Self {
        Self {
            angle_space: AngleSpace::Spatial,
            ..Self::default()
        }
    }

    /// Defaults overridden by `MOTIONLAB_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(raw) = non_empty(lookup(MIN_VISIBILITY_ENV)) {
            settings.min_visibility = parse_f64(MIN_VISIBILITY_ENV, &raw)?;
        }
        if let Some(raw) = non_empty(lookup(DEFAULT_FPS_ENV)) {
            settings.default_fps = parse_f64(DEFAULT_FPS_ENV, &raw)?;
        }
        if let Some(raw) = non_empty(lookup(SPORTS_CONFIG_ENV)) {
            settings.sports_config_path = Some(PathBuf::from(raw));
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Range-check after manual overrides.
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        self.validate()?;
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_f64(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.parse::<f64>().map_err(|_| ConfigError::InvalidEnv {
        key,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_settings() {
        let s = AnalyzerSettings::default();
        assert!((s.min_visibility - 0.5).abs() < f64::EPSILON);
        assert!((s.default_fps - 24.0).abs() < f64::EPSILON);
        assert_eq!(s.top_window, PhaseWindowPolicy::Fixed);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let s = AnalyzerSettings::from_lookup(lookup(&[
            (MIN_VISIBILITY_ENV, "0.7"),
            (DEFAULT_FPS_ENV, " 30 "),
            (SPORTS_CONFIG_ENV, "/etc/motionlab/sports.yaml"),
        ]))
        .unwrap();
        assert!((s.min_visibility - 0.7).abs() < 1e-12);
        assert!((s.default_fps - 30.0).abs() < 1e-12);
        assert_eq!(
            s.sports_config_path,
            Some(PathBuf::from("/etc/motionlab/sports.yaml"))
        );
    }

    #[test]
    fn test_env_blank_values_ignored() {
        let s = AnalyzerSettings::from_lookup(lookup(&[(MIN_VISIBILITY_ENV, "  ")])).unwrap();
        assert_eq!(s, AnalyzerSettings::default());
    }

    #[test]
    fn test_env_out_of_range_rejected() {
        let err = AnalyzerSettings::from_lookup(lookup(&[(MIN_VISIBILITY_ENV, "1.5")]));
        assert!(matches!(err, Err(ConfigError::InvalidSettings(_))));

        let manual = AnalyzerSettings {
            default_fps: 0.0,
            ..AnalyzerSettings::default()
        };
        assert!(manual.ensure_valid().is_err());
    }

    #[test]
    fn test_env_garbage_rejected() {
        let err = AnalyzerSettings::from_lookup(lookup(&[(DEFAULT_FPS_ENV, "fast")]));
        assert!(matches!(err, Err(ConfigError::InvalidEnv { .. })));
    }

    #[test]
    fn test_usable_fps() {
        assert_eq!(usable_fps(30.0), Some(30.0));
        assert_eq!(usable_fps(0.0), None);
        assert_eq!(usable_fps(-24.0), None);
        assert_eq!(usable_fps(f64::NAN), None);
        assert_eq!(usable_fps(f64::INFINITY), None);
    }

    #[test]
    fn test_fps_scaled_window_must_be_bounded() {
        let with_window = |seconds: f64| AnalyzerSettings {
            top_window: PhaseWindowPolicy::FpsScaled { seconds },
            ..AnalyzerSettings::default()
        };
        assert!(with_window(0.1).ensure_valid().is_ok());
        assert!(with_window(PhaseWindowPolicy::MAX_SECONDS).ensure_valid().is_ok());
        for seconds in [1e30, f64::INFINITY, f64::NAN, -0.5] {
            assert!(matches!(
                with_window(seconds).ensure_valid(),
                Err(ConfigError::InvalidSettings(_))
            ));
        }
    }

    #[test]
    fn test_window_policy_deserializes() {
        let policy: PhaseWindowPolicy =
            serde_json::from_str(r#"{"mode": "fps_scaled", "seconds": 0.1}"#).unwrap();
        assert_eq!(policy, PhaseWindowPolicy::FpsScaled { seconds: 0.1 });
    }

    #[test]
    fn test_window_half_width() {
        assert_eq!(PhaseWindowPolicy::Fixed.half_width(None, 30.0), 2);
        assert_eq!(PhaseWindowPolicy::Fixed.half_width(Some(3), 30.0), 3);
        let scaled = PhaseWindowPolicy::FpsScaled { seconds: 0.1 };
        assert_eq!(scaled.half_width(Some(2), 30.0), 3);
        assert_eq!(scaled.half_width(Some(2), 60.0), 6);
        assert_eq!(PhaseWindowPolicy::FpsScaled { seconds: -1.0 }.half_width(None, 30.0), 0);
    }
}
