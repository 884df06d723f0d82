use super::*;
use crate::config::{AngleDefinition, SportConfigStore};
use crate::landmarks::{Landmark, LANDMARK_COUNT};
use crate::models::Point;

fn arm_config() -> SportConfig {
    SportConfig::new(
        vec![AngleDefinition::three_point(
            "left_arm_angle",
            ["left_shoulder", "left_elbow", "left_wrist"],
            (165.0, 180.0),
        )],
        vec![],
    )
}

fn frame(index: u32, points: &[(Landmark, Point)]) -> Frame {
    let mut all = vec![Point::new(0.0, 0.0, 0.0, 0.0); LANDMARK_COUNT];
    for (lm, p) in points {
        all[lm.index()] = *p;
    }
    Frame::new(index, index as f64 / 30.0, all)
}

/// Left arm with the wrist placed so the elbow angle is `degrees`.
fn arm_frame(index: u32, degrees: f64, visibility: f64) -> Frame {
    let rad = degrees.to_radians();
    frame(
        index,
        &[
            (Landmark::LeftShoulder, Point::new(0.0, 0.0, 0.0, visibility)),
            (Landmark::LeftElbow, Point::new(1.0, 0.0, 0.0, 1.0)),
            (
                Landmark::LeftWrist,
                Point::new(1.0 - rad.cos(), rad.sin(), 0.0, 1.0),
            ),
        ],
    )
}

#[test]
fn test_collinear_arm_is_180() {
    let frames = vec![frame(
        0,
        &[
            (Landmark::LeftShoulder, Point::planar(0.0, 0.0)),
            (Landmark::LeftElbow, Point::planar(1.0, 0.0)),
            (Landmark::LeftWrist, Point::planar(2.0, 0.0)),
        ],
    )];
    let report = AngleEngine::default().compute(&frames, &arm_config());
    assert_eq!(report.per_frame[0].get("left_arm_angle"), Some(180.0));
    assert_eq!(report.averages.get("left_arm_angle"), Some(&180.0));
}

#[test]
fn test_right_angle_arm_is_90() {
    let frames = vec![frame(
        0,
        &[
            (Landmark::LeftShoulder, Point::planar(0.0, 1.0)),
            (Landmark::LeftElbow, Point::planar(0.0, 0.0)),
            (Landmark::LeftWrist, Point::planar(1.0, 0.0)),
        ],
    )];
    let report = AngleEngine::default().compute(&frames, &arm_config());
    assert_eq!(report.per_frame[0].get("left_arm_angle"), Some(90.0));
}

#[test]
fn test_visibility_threshold_is_inclusive() {
    let engine = AngleEngine::new(0.5, AngleSpace::Planar);

    let at = engine.compute(&[arm_frame(0, 120.0, 0.5)], &arm_config());
    assert_eq!(at.per_frame.len(), 1);

    let below = engine.compute(&[arm_frame(0, 120.0, 0.5 - 1e-9)], &arm_config());
    assert!(below.per_frame.is_empty());
    assert!(below.averages.is_empty());
}

#[test]
fn test_zero_length_arm_is_absent() {
    let frames = vec![frame(
        0,
        &[
            (Landmark::LeftShoulder, Point::planar(0.3, 0.3)),
            (Landmark::LeftElbow, Point::planar(0.3, 0.3)),
            (Landmark::LeftWrist, Point::planar(0.6, 0.3)),
        ],
    )];
    let report = AngleEngine::default().compute(&frames, &arm_config());
    assert!(report.is_empty());
}

#[test]
fn test_short_frame_skips_angle() {
    let frames = vec![Frame::new(0, 0.0, vec![Point::planar(0.0, 0.0); 12])];
    let report = AngleEngine::default().compute(&frames, &arm_config());
    assert!(report.is_empty());
}

#[test]
fn test_averages_use_only_frames_with_values() {
    let frames = vec![
        arm_frame(0, 170.0, 1.0),
        arm_frame(1, 0.0, 0.0),
        arm_frame(2, 171.0, 1.0),
        arm_frame(3, 175.0, 1.0),
    ];
    let report = AngleEngine::default().compute(&frames, &arm_config());
    let indices: Vec<u32> = report.per_frame.iter().map(|f| f.frame_index).collect();
    assert_eq!(indices, vec![0, 2, 3]);
    assert_eq!(report.averages.get("left_arm_angle"), Some(&172.0));
}

#[test]
fn test_angle_without_values_has_no_average() {
    let config = SportConfig::new(
        vec![
            AngleDefinition::three_point(
                "left_arm_angle",
                ["left_shoulder", "left_elbow", "left_wrist"],
                (165.0, 180.0),
            ),
            AngleDefinition::three_point(
                "left_knee_angle",
                ["left_hip", "left_knee", "left_ankle"],
                (155.0, 170.0),
            ),
        ],
        vec![],
    );
    let frames: Vec<Frame> = (0..5).map(|i| arm_frame(i, 160.0, 1.0)).collect();
    let report = AngleEngine::default().compute(&frames, &config);

    assert_eq!(report.per_frame.len(), 5);
    assert!(report.averages.contains_key("left_arm_angle"));
    assert!(!report.averages.contains_key("left_knee_angle"));
    assert!(report.per_frame.iter().all(|f| f.get("left_knee_angle").is_none()));
}

#[test]
fn test_unknown_landmark_name_skips_only_that_angle() {
    let config = SportConfig::new(
        vec![
            AngleDefinition::three_point(
                "left_arm_angle",
                ["left_shoulder", "left_elbow", "left_wrist"],
                (165.0, 180.0),
            ),
            AngleDefinition::three_point("tail_angle", ["left_hip", "tail", "left_knee"], (0.0, 10.0)),
        ],
        vec![],
    );
    let report = AngleEngine::default().compute(&[arm_frame(0, 150.0, 1.0)], &config);
    assert_eq!(report.per_frame[0].get("left_arm_angle"), Some(150.0));
    assert!(!report.averages.contains_key("tail_angle"));
}

#[test]
fn test_spatial_engine_uses_depth() {
    let frames = vec![frame(
        0,
        &[
            (Landmark::LeftShoulder, Point::new(0.0, 1.0, 0.0, 1.0)),
            (Landmark::LeftElbow, Point::new(0.0, 0.0, 0.0, 1.0)),
            (Landmark::LeftWrist, Point::new(0.0, 0.0, 1.0, 1.0)),
        ],
    )];
    let planar = AngleEngine::default().compute(&frames, &arm_config());
    assert!(planar.is_empty());

    let spatial = AngleEngine::from_settings(&AnalyzerSettings::spatial());
    let report = spatial.compute(&frames, &arm_config());
    assert_eq!(report.per_frame[0].get("left_arm_angle"), Some(90.0));
}

#[test]
fn test_driver_config_computes_separation() {
    let store = SportConfigStore::embedded().unwrap();
    let driver = store.get("GOLF", "DRIVER").unwrap();

    let frames = vec![frame(
        7,
        &[
            (Landmark::LeftShoulder, Point::planar(0.4, 0.3)),
            (Landmark::RightShoulder, Point::planar(0.6, 0.5)),
            (Landmark::LeftHip, Point::planar(0.45, 0.6)),
            (Landmark::RightHip, Point::planar(0.55, 0.6)),
        ],
    )];
    let report = AngleEngine::default().compute(&frames, driver);
    assert_eq!(report.per_frame[0].frame_index, 7);
    assert_eq!(report.per_frame[0].get("hip_shoulder_separation"), Some(45.0));
}

#[test]
fn test_compute_is_idempotent() {
    let frames: Vec<Frame> = (0..30)
        .map(|i| arm_frame(i, 120.0 + i as f64 * 1.7, 1.0))
        .collect();
    let engine = AngleEngine::default();
    let first = serde_json::to_string(&engine.compute(&frames, &arm_config())).unwrap();
    let second = serde_json::to_string(&engine.compute(&frames, &arm_config())).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_input_gives_empty_report() {
    let report = AngleEngine::default().compute(&[], &arm_config());
    assert!(report.is_empty());
    assert!(report.averages.is_empty());
}
