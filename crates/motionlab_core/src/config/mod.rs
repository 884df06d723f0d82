//! # Configuration
//!
//! - [`SportConfigStore`]: (종목, 세부종목) → 각도 정의 + 구간 규칙
//! - [`AnalyzerSettings`]: 엔진 튜닝 값 (가시성, fps, 각도 공간)
//!
//! Sport data lives in `data/sports_config.yaml` and is embedded at compile
//! time. Everything is validated when the store is built.

pub mod file;
mod settings;
mod store;
mod types;

pub use file::{sports_file_schema, SportsFile};
pub use settings::{
    AnalyzerSettings, AngleSpace, PhaseWindowPolicy, DEFAULT_FPS, DEFAULT_FPS_ENV,
    DEFAULT_MIN_VISIBILITY, MIN_VISIBILITY_ENV, SPORTS_CONFIG_ENV, usable_fps,
};
pub use store::{SportConfigStore, SPORTS_CONFIG_YAML};
pub use types::{
    AngleDefinition, AngleKind, DetectionRule, IdealRange, PhaseParams, PhaseRule,
    SpecialCalculator, SportConfig,
};
