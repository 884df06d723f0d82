//! Raw on-disk shape of `sports_config.yaml`.
//!
//! ```yaml
//! GOLF:
//!   sub_categories:
//!     DRIVER:
//!       angles:
//!         left_arm_angle:
//!           points: [left_shoulder, left_elbow, left_wrist]
//!           ideal_range: [165.0, 180.0]
//!       phases:
//!         - name: address
//!           detection_rule: velocity_threshold
//!           target_angle: left_arm_angle
//!           params: { window_size: 5, threshold: 5.0 }
//! ```
//!
//! These structs only mirror the file. Conversion into [`SportConfig`] is
//! where validation happens.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::{
    AngleDefinition, AngleKind, IdealRange, PhaseRule, SpecialCalculator, SportConfig,
};
use crate::error::ConfigError;
use crate::landmarks;

/// Whole file: sport key → sport entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SportsFile(pub BTreeMap<String, SportFile>);

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SportFile {
    pub sub_categories: BTreeMap<String, SportConfigFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SportConfigFile {
    pub angles: BTreeMap<String, AngleDefinitionFile>,
    #[serde(default)]
    pub phases: Vec<PhaseRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AngleDefinitionFile {
    /// Three landmark names, vertex in the middle. `null` selects a special
    /// calculator.
    #[serde(default)]
    pub points: Option<Vec<String>>,
    /// Special calculator name. Defaults to the angle's own name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculator: Option<String>,
    /// `[min, max]` in degrees.
    pub ideal_range: (f64, f64),
    #[serde(default)]
    pub description: String,
}

impl SportConfigFile {
    /// Validate and convert. `location` is used in error messages
    /// (e.g. `"GOLF/DRIVER"`).
    pub fn into_config(self, location: &str) -> Result<SportConfig, ConfigError> {
        let mut angles = BTreeMap::new();
        for (name, def) in self.angles {
            let angle = def.into_definition(location, &name)?;
            angles.insert(name, angle);
        }

        for rule in &self.phases {
            rule.validate(location, &angles)?;
        }

        Ok(SportConfig {
            angles,
            phases: self.phases,
        })
    }
}

impl AngleDefinitionFile {
    fn into_definition(self, location: &str, name: &str) -> Result<AngleDefinition, ConfigError> {
        let (min, max) = self.ideal_range;
        if min > max {
            return Err(ConfigError::InvertedRange {
                location: location.to_string(),
                angle: name.to_string(),
                min,
                max,
            });
        }

        let kind = match self.points {
            Some(points) => {
                let points: [String; 3] =
                    points
                        .try_into()
                        .map_err(|p: Vec<String>| ConfigError::PointCount {
                            location: location.to_string(),
                            angle: name.to_string(),
                            found: p.len(),
                        })?;
                if let Some(bad) = points.iter().find(|p| landmarks::resolve(p).is_none()) {
                    return Err(ConfigError::UnknownLandmark {
                        location: location.to_string(),
                        angle: name.to_string(),
                        point: bad.clone(),
                    });
                }
                AngleKind::ThreePoint { points }
            }
            None => {
                let calculator = self.calculator.as_deref().unwrap_or(name);
                let special = SpecialCalculator::from_name(calculator).ok_or_else(|| {
                    ConfigError::UnknownCalculator {
                        location: location.to_string(),
                        angle: name.to_string(),
                        calculator: calculator.to_string(),
                    }
                })?;
                AngleKind::Special(special)
            }
        };

        Ok(AngleDefinition {
            name: name.to_string(),
            kind,
            ideal_range: IdealRange { min, max },
            description: self.description,
        })
    }
}

/// JSON Schema of the sports configuration file.
pub fn sports_file_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(SportsFile)
}
