use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 프레임별 각도 (계산에 성공한 각도만 포함)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameAngles {
    pub frame_index: u32,
    pub angles: BTreeMap<String, f64>,
}

impl FrameAngles {
    pub fn get(&self, angle: &str) -> Option<f64> {
        self.angles.get(angle).copied()
    }
}

/// Angle engine output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AngleReport {
    pub per_frame: Vec<FrameAngles>,
    /// Mean per angle over the frames that produced it. An angle with no
    /// values has no entry.
    pub averages: BTreeMap<String, f64>,
}

impl AngleReport {
    pub fn is_empty(&self) -> bool {
        self.per_frame.is_empty()
    }
}

/// 구간 (시리즈 인덱스 기준)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Phase {
    pub name: String,
    pub start_frame: usize,
    pub end_frame: usize,
    pub duration_ms: u64,
}

impl Phase {
    pub fn frame_count(&self) -> usize {
        self.end_frame.saturating_sub(self.start_frame)
    }

    pub fn contains(&self, frame: usize) -> bool {
        (self.start_frame..=self.end_frame).contains(&frame)
    }
}

/// Position of an averaged angle relative to its ideal range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Within,
    Below,
    Above,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AngleAssessment {
    pub angle: String,
    pub value: f64,
    pub ideal_min: f64,
    pub ideal_max: f64,
    pub status: AssessmentStatus,
    /// Degrees outside the ideal range, 0.0 when within.
    pub deviation: f64,
}

/// 파이프라인 최종 출력 (피드백 생성기로 전달)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub frame_angles: Vec<FrameAngles>,
    pub average_angles: BTreeMap<String, f64>,
    pub phases: Vec<Phase>,
    #[serde(default)]
    pub assessments: Vec<AngleAssessment>,
}

impl AnalysisReport {
    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_frame_count_and_contains() {
        let phase = Phase {
            name: "backswing".to_string(),
            start_frame: 21,
            end_frame: 60,
            duration_ms: 1625,
        };
        assert_eq!(phase.frame_count(), 39);
        assert!(phase.contains(21));
        assert!(phase.contains(60));
        assert!(!phase.contains(61));
    }

    #[test]
    fn test_assessment_status_serializes_snake_case() {
        let json = serde_json::to_string(&AssessmentStatus::Within).unwrap();
        assert_eq!(json, "\"within\"");
    }

    #[test]
    fn test_report_phase_lookup() {
        let report = AnalysisReport {
            phases: vec![Phase {
                name: "top".to_string(),
                start_frame: 8,
                end_frame: 12,
                duration_ms: 167,
            }],
            ..Default::default()
        };
        assert_eq!(report.phase("top").map(|p| p.start_frame), Some(8));
        assert!(report.phase("impact").is_none());
    }
}
