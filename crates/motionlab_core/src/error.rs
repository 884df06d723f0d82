use thiserror::Error;

/// Sport configuration is malformed. Raised at load time, before any frame
/// is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("{location}: sport defines no sub-categories")]
    EmptySport { location: String },

    #[error("{location}: angle '{angle}' needs exactly 3 points, found {found}")]
    PointCount {
        location: String,
        angle: String,
        found: usize,
    },

    #[error("{location}: angle '{angle}' references unknown landmark '{point}'")]
    UnknownLandmark {
        location: String,
        angle: String,
        point: String,
    },

    #[error("{location}: angle '{angle}' has no points and no registered calculator '{calculator}'")]
    UnknownCalculator {
        location: String,
        angle: String,
        calculator: String,
    },

    #[error("{location}: angle '{angle}' ideal range is inverted ({min} > {max})")]
    InvertedRange {
        location: String,
        angle: String,
        min: f64,
        max: f64,
    },

    #[error("{location}: phase '{phase}' targets undefined angle '{angle}'")]
    UnknownTargetAngle {
        location: String,
        phase: String,
        angle: String,
    },

    #[error("{location}: phase '{phase}' requires parameter '{param}'")]
    MissingParam {
        location: String,
        phase: String,
        param: &'static str,
    },

    #[error("{location}: phase '{phase}' parameter '{param}' is invalid: {reason}")]
    InvalidParam {
        location: String,
        phase: String,
        param: &'static str,
        reason: String,
    },

    #[error("Environment variable {key}='{value}' is not a number")]
    InvalidEnv { key: &'static str, value: String },

    #[error("Invalid analyzer settings: {0}")]
    InvalidSettings(#[from] validator::ValidationErrors),
}

/// Unknown (sport, sub-category) key. This is a caller input error, so it
/// lists the keys that would have worked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigNotFound {
    #[error("Unsupported sport: {sport} (available: {})", .available.join(", "))]
    Sport {
        sport: String,
        available: Vec<String>,
    },

    #[error("Unsupported sub-category: {sport}/{sub_category} (available: {})", .available.join(", "))]
    SubCategory {
        sport: String,
        sub_category: String,
        available: Vec<String>,
    },
}

impl ConfigNotFound {
    pub fn available(&self) -> &[String] {
        match self {
            ConfigNotFound::Sport { available, .. } => available,
            ConfigNotFound::SubCategory { available, .. } => available,
        }
    }
}

/// Pipeline-level error. Per-frame problems never surface here.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    NotFound(#[from] ConfigNotFound),

    #[error("Invalid landmark input: {0}")]
    InvalidInput(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Error code shared with the analysis service's error registry.
    pub fn error_code(&self) -> &'static str {
        match self {
            AnalysisError::NotFound(_) => "AN_005",
            AnalysisError::InvalidInput(_) => "VAL_000",
            AnalysisError::Config(_) => "SYS_013",
        }
    }

    /// `true` when retrying with the same input cannot succeed.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::NotFound(_) | AnalysisError::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
