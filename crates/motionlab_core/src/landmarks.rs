//! # Landmark Index Resolver
//!
//! MediaPipe Pose 33점 스키마의 이름 → 배열 인덱스 매핑.
//!
//! Config 파일은 `"left_shoulder"` 같은 의미 이름으로 관절을 가리키고,
//! 프레임은 점들을 고정 순서 배열로 들고 온다. 이 모듈이 둘을 연결한다.
//!
//! ## 사용법
//! ```rust
//! use motionlab_core::landmarks::{resolve, Landmark};
//!
//! assert_eq!(resolve("left_shoulder"), Some(11));
//! assert_eq!(resolve("Left_Shoulder"), Some(11));
//! assert_eq!(resolve("tail"), None);
//! assert_eq!(Landmark::RightHip.index(), 24);
//! ```

use serde::{Deserialize, Serialize};

/// Number of points per frame in the MediaPipe Pose schema.
pub const LANDMARK_COUNT: usize = 33;

/// Canonical names, positionally aligned with the per-frame point array.
pub const LANDMARK_NAMES: [&str; LANDMARK_COUNT] = [
    "nose",
    "left_eye_inner",
    "left_eye",
    "left_eye_outer",
    "right_eye_inner",
    "right_eye",
    "right_eye_outer",
    "left_ear",
    "right_ear",
    "mouth_left",
    "mouth_right",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_pinky",
    "right_pinky",
    "left_index",
    "right_index",
    "left_thumb",
    "right_thumb",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
    "left_heel",
    "right_heel",
    "left_foot_index",
    "right_foot_index",
];

/// Body landmarks used by built-in calculators.
///
/// Only the points the engine itself references are named here; configs can
/// still address any of the 33 points by name through [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Landmark {
    pub const fn index(self) -> usize {
        match self {
            Landmark::Nose => 0,
            Landmark::LeftShoulder => 11,
            Landmark::RightShoulder => 12,
            Landmark::LeftElbow => 13,
            Landmark::RightElbow => 14,
            Landmark::LeftWrist => 15,
            Landmark::RightWrist => 16,
            Landmark::LeftHip => 23,
            Landmark::RightHip => 24,
            Landmark::LeftKnee => 25,
            Landmark::RightKnee => 26,
            Landmark::LeftAnkle => 27,
            Landmark::RightAnkle => 28,
        }
    }

    pub fn name(self) -> &'static str {
        LANDMARK_NAMES[self.index()]
    }
}

/// 이름 → 인덱스 (O(1)).
///
/// 정규화된(소문자, 공백 없음) 이름이 먼저 매칭되고, 대소문자/공백이 섞인
/// 이름은 한 번 정규화한 뒤 재시도한다. 모르는 이름은 `None`.
pub fn resolve(name: &str) -> Option<usize> {
    canonical_index(name).or_else(|| {
        let normalized = name.trim().to_ascii_lowercase();
        if normalized == name {
            None
        } else {
            canonical_index(&normalized)
        }
    })
}

/// 인덱스 → 이름
pub fn name_of(index: usize) -> Option<&'static str> {
    LANDMARK_NAMES.get(index).copied()
}

fn canonical_index(name: &str) -> Option<usize> {
    let index = match name {
        "nose" => 0,
        "left_eye_inner" => 1,
        "left_eye" => 2,
        "left_eye_outer" => 3,
        "right_eye_inner" => 4,
        "right_eye" => 5,
        "right_eye_outer" => 6,
        "left_ear" => 7,
        "right_ear" => 8,
        "mouth_left" => 9,
        "mouth_right" => 10,
        "left_shoulder" => 11,
        "right_shoulder" => 12,
        "left_elbow" => 13,
        "right_elbow" => 14,
        "left_wrist" => 15,
        "right_wrist" => 16,
        "left_pinky" => 17,
        "right_pinky" => 18,
        "left_index" => 19,
        "right_index" => 20,
        "left_thumb" => 21,
        "right_thumb" => 22,
        "left_hip" => 23,
        "right_hip" => 24,
        "left_knee" => 25,
        "right_knee" => 26,
        "left_ankle" => 27,
        "right_ankle" => 28,
        "left_heel" => 29,
        "right_heel" => 30,
        "left_foot_index" => 31,
        "right_foot_index" => 32,
        _ => return None,
    };
    Some(index)
}
