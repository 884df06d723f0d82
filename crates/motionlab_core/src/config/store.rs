//! # Sport Configuration Store
//!
//! `sports_config.yaml` 를 로드/검증해서 (종목, 세부종목) → [`SportConfig`] 로 제공.
//!
//! 프로세스 시작 시 한 번 만들고 참조로 넘긴다. 생성 이후에는 읽기 전용이라
//! 스레드 간 공유에 락이 필요 없다.
//!
//! ## 사용법
//! ```rust
//! use motionlab_core::config::SportConfigStore;
//!
//! let store = SportConfigStore::embedded().unwrap();
//! let driver = store.get("GOLF", "DRIVER").unwrap();
//! assert!(driver.angle("left_arm_angle").is_some());
//!
//! let err = store.get("GOLF", "WEDGE").unwrap_err();
//! assert!(err.available().contains(&"IRON".to_string()));
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::info;

use super::file::SportsFile;
use super::types::SportConfig;
use crate::error::{ConfigError, ConfigNotFound};

/// Embedded sport configuration (컴파일 타임 임베딩)
pub const SPORTS_CONFIG_YAML: &str = include_str!("../../../../data/sports_config.yaml");

#[derive(Debug, Clone, Default)]
pub struct SportConfigStore {
    sports: BTreeMap<String, BTreeMap<String, SportConfig>>,
}

impl SportConfigStore {
    /// Built-in golf / weight-training configuration.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_yaml_str(SPORTS_CONFIG_YAML)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// `path` if given, the embedded config otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::embedded(),
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: SportsFile = serde_yaml::from_str(yaml)?;
        let store = Self::try_from(file)?;
        info!(
            sports = store.sports.len(),
            configs = store.len(),
            "sport configuration loaded"
        );
        Ok(store)
    }

    /// Look up a (sport, sub-category) pair. Keys are matched case-insensitively.
    pub fn get(&self, sport_type: &str, sub_category: &str) -> Result<&SportConfig, ConfigNotFound> {
        let sport_key = normalize_key(sport_type);
        let sport = self
            .sports
            .get(&sport_key)
            .ok_or_else(|| ConfigNotFound::Sport {
                sport: sport_type.to_string(),
                available: self.sports.keys().cloned().collect(),
            })?;

        sport
            .get(&normalize_key(sub_category))
            .ok_or_else(|| ConfigNotFound::SubCategory {
                sport: sport_key,
                sub_category: sub_category.to_string(),
                available: sport.keys().cloned().collect(),
            })
    }

    pub fn sports(&self) -> impl Iterator<Item = &str> {
        self.sports.keys().map(String::as_str)
    }

    /// All (sport, sub-category) pairs in sorted order.
    pub fn keys(&self) -> Vec<(&str, &str)> {
        self.sports
            .iter()
            .flat_map(|(sport, subs)| subs.keys().map(move |sub| (sport.as_str(), sub.as_str())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sports.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TryFrom<SportsFile> for SportConfigStore {
    type Error = ConfigError;

    fn try_from(file: SportsFile) -> Result<Self, Self::Error> {
        let mut sports = BTreeMap::new();
        for (sport_name, sport) in file.0 {
            let sport_key = normalize_key(&sport_name);
            if sport.sub_categories.is_empty() {
                return Err(ConfigError::EmptySport {
                    location: sport_key,
                });
            }

            let mut subs = BTreeMap::new();
            for (sub_name, raw) in sport.sub_categories {
                let sub_key = normalize_key(&sub_name);
                let location = format!("{}/{}", sport_key, sub_key);
                subs.insert(sub_key, raw.into_config(&location)?);
            }
            sports.insert(sport_key, subs);
        }
        Ok(Self { sports })
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}
