//! Angle time series extraction.

use crate::models::FrameAngles;

/// Dense series of `angle` over all frames.
///
/// Missing values repeat the previous value (zero-order hold); values missing
/// before the first observation are 0.0.
pub fn extract_series(frame_angles: &[FrameAngles], angle: &str) -> Vec<f64> {
    let mut series = Vec::with_capacity(frame_angles.len());
    let mut last = 0.0;
    for frame in frame_angles {
        if let Some(value) = frame.get(angle) {
            last = value;
        }
        series.push(last);
    }
    series
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}
