use serde::{Deserialize, Serialize};

/// 단일 랜드마크 좌표 (정규화 좌표)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64, // 0.0..=1.0 (image width)
    pub y: f64, // 0.0..=1.0 (image height)
    pub z: f64, // unscaled depth, negative = toward camera
    /// Detection confidence in [0, 1]. Not a spatial coordinate.
    pub visibility: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self { x, y, z, visibility }
    }

    /// Fully visible point on the image plane.
    pub const fn planar(x: f64, y: f64) -> Self {
        Self::new(x, y, 0.0, 1.0)
    }
}

/// 프레임별 랜드마크
///
/// Field names follow the extractor's JSON output (`timestamp`, `landmarks`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Frame {
    pub frame_index: u32,
    #[serde(rename = "timestamp", alias = "timestamp_seconds", default)]
    pub timestamp_seconds: f64,
    #[serde(rename = "landmarks", alias = "points")]
    pub points: Vec<Point>,
}

impl Frame {
    pub fn new(frame_index: u32, timestamp_seconds: f64, points: Vec<Point>) -> Self {
        Self {
            frame_index,
            timestamp_seconds,
            points,
        }
    }

    /// Point at `index` if it exists and its visibility reaches `min_visibility`.
    #[inline]
    pub fn visible_point(&self, index: usize, min_visibility: f64) -> Option<&Point> {
        self.points
            .get(index)
            .filter(|p| p.visibility >= min_visibility)
    }
}

/// Extractor output: frames plus the video metadata the engine needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandmarkSequence {
    pub fps: f64,
    #[serde(default)]
    pub total_frame_count: u32,
    #[serde(default)]
    pub valid_frame_count: u32,
    pub frames: Vec<Frame>,
}

impl LandmarkSequence {
    pub fn new(fps: f64, frames: Vec<Frame>) -> Self {
        let count = frames.len() as u32;
        Self {
            fps,
            total_frame_count: count,
            valid_frame_count: count,
            frames,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
