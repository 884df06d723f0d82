//! Special calculators: angles that are not a single three-point vertex angle.

use super::geometry::{line_orientation, orientation_difference, round1};
use crate::config::SpecialCalculator;
use crate::landmarks::Landmark;
use crate::models::{Frame, Point};

impl SpecialCalculator {
    /// Landmarks that must pass the visibility gate.
    pub fn required_landmarks(self) -> &'static [Landmark] {
        match self {
            SpecialCalculator::HipShoulderSeparation => &[
                Landmark::LeftShoulder,
                Landmark::RightShoulder,
                Landmark::LeftHip,
                Landmark::RightHip,
            ],
        }
    }

    /// Value for one frame, `None` if any required point is missing or
    /// below `min_visibility`, or the geometry is degenerate.
    pub fn compute(self, frame: &Frame, min_visibility: f64) -> Option<f64> {
        match self {
            SpecialCalculator::HipShoulderSeparation => {
                hip_shoulder_separation(frame, min_visibility)
            }
        }
    }
}

/// Points listed by `required_landmarks`, in that order. `None` if any
/// fails the visibility gate.
fn gated(calculator: SpecialCalculator, frame: &Frame, min_visibility: f64) -> Option<Vec<&Point>> {
    calculator
        .required_landmarks()
        .iter()
        .map(|lm| frame.visible_point(lm.index(), min_visibility))
        .collect()
}

/// 엉덩이-어깨 분리각
///
/// 1. 엉덩이 회전각 = atan2(right_hip.y - left_hip.y, right_hip.x - left_hip.x)
/// 2. 어깨 회전각 = atan2(right_shoulder.y - left_shoulder.y, ...)
/// 3. 분리각 = |어깨 - 엉덩이| (도, [0, 180])
fn hip_shoulder_separation(frame: &Frame, min_visibility: f64) -> Option<f64> {
    let points = gated(SpecialCalculator::HipShoulderSeparation, frame, min_visibility)?;
    let [left_shoulder, right_shoulder, left_hip, right_hip] = points[..] else {
        return None;
    };

    let shoulder = line_orientation(left_shoulder, right_shoulder)?;
    let hip = line_orientation(left_hip, right_hip)?;

    Some(round1(orientation_difference(shoulder, hip)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::LANDMARK_COUNT;

    fn frame_with(points: &[(Landmark, Point)]) -> Frame {
        let mut all = vec![Point::default(); LANDMARK_COUNT];
        for (lm, p) in points {
            all[lm.index()] = *p;
        }
        Frame::new(0, 0.0, all)
    }

    fn torso(shoulder_rise: f64, visibility: f64) -> Frame {
        frame_with(&[
            (Landmark::LeftShoulder, Point::new(0.4, 0.3, 0.0, visibility)),
            (
                Landmark::RightShoulder,
                Point::new(0.6, 0.3 + shoulder_rise, 0.0, 1.0),
            ),
            (Landmark::LeftHip, Point::new(0.45, 0.6, 0.0, 1.0)),
            (Landmark::RightHip, Point::new(0.55, 0.6, 0.0, 1.0)),
        ])
    }

    #[test]
    fn test_parallel_lines_have_zero_separation() {
        let value = SpecialCalculator::HipShoulderSeparation.compute(&torso(0.0, 1.0), 0.5);
        assert_eq!(value, Some(0.0));
    }

    #[test]
    fn test_rotated_shoulders() {
        // Shoulder line at 45 degrees, hips level.
        let value = SpecialCalculator::HipShoulderSeparation.compute(&torso(0.2, 1.0), 0.5);
        assert_eq!(value, Some(45.0));
    }

    #[test]
    fn test_visibility_gate_applies() {
        let calc = SpecialCalculator::HipShoulderSeparation;
        assert_eq!(calc.compute(&torso(0.2, 0.49), 0.5), None);
        assert_eq!(calc.compute(&torso(0.2, 0.5), 0.5), Some(45.0));
    }

    #[test]
    fn test_missing_points_is_none() {
        let frame = Frame::new(0, 0.0, vec![Point::planar(0.0, 0.0); 12]);
        assert_eq!(
            SpecialCalculator::HipShoulderSeparation.compute(&frame, 0.5),
            None
        );
    }

    #[test]
    fn test_every_required_landmark_is_gated() {
        let calc = SpecialCalculator::HipShoulderSeparation;
        assert_eq!(calc.required_landmarks().len(), 4);
        for hidden in calc.required_landmarks() {
            let mut frame = torso(0.2, 1.0);
            frame.points[hidden.index()].visibility = 0.1;
            assert_eq!(calc.compute(&frame, 0.5), None, "{:?}", hidden);
        }
    }
}
