//! Anchor search + phase range assembly.
//!
//! 앵커 규칙(velocity_threshold, angle_max, angle_min, stabilization)은 시리즈를
//! 직접 탐색해서 경계 인덱스를 찾고, 스팬 규칙(angle_increase, angle_decrease,
//! angle_range)은 앞뒤 앵커 사이 구간을 나눠 갖는다.

use std::collections::BTreeMap;

use tracing::debug;

use super::rules as search;
use crate::config::{DetectionRule, PhaseRule};

/// Inclusive `[start, end]` series positions.
pub(crate) type Span = (usize, usize);

/// Anchor index for every anchor rule, `None` for span rules.
///
/// Each search starts at the previous anchor, so the anchors are monotone.
pub(crate) fn find_anchors(rules: &[PhaseRule], series: &BTreeMap<&str, Vec<f64>>) -> Vec<Option<usize>> {
    let mut previous = 0;
    rules
        .iter()
        .map(|rule| {
            let s = series.get(rule.target_angle.as_str())?;
            let start = previous.min(s.len().saturating_sub(1));
            let params = &rule.params;
            let window = params.window_size.unwrap_or(1).max(1);

            let anchor = match rule.detection_rule {
                DetectionRule::VelocityThreshold => {
                    search::velocity_threshold(s, start, window, params.threshold.unwrap_or(0.0))
                }
                DetectionRule::AngleMax => search::angle_max(s, start),
                DetectionRule::AngleMin => search::angle_min(s, start),
                DetectionRule::Stabilization => search::stabilization(
                    s,
                    start,
                    window,
                    params.variance_threshold.unwrap_or(0.0),
                ),
                DetectionRule::AngleIncrease
                | DetectionRule::AngleDecrease
                | DetectionRule::AngleRange => return None,
            };
            debug!(
                phase = %rule.name,
                rule = rule.detection_rule.as_str(),
                anchor,
                "anchor found"
            );
            previous = anchor;
            Some(anchor)
        })
        .collect()
}

/// One span per rule, in rule order.
///
/// `half_widths[i]` is the window half-width for rule `i` (only read for
/// `angle_max` / `angle_min`).
pub(crate) fn assemble(
    rules: &[PhaseRule],
    anchors: &[Option<usize>],
    half_widths: &[usize],
    series: &BTreeMap<&str, Vec<f64>>,
    len: usize,
) -> Vec<Span> {
    let last = len.saturating_sub(1);
    let mut spans = vec![(0, 0); rules.len()];
    let mut previous: Option<usize> = None;

    let mut i = 0;
    while i < rules.len() {
        if let Some(anchor) = anchors[i] {
            spans[i] = match rules[i].detection_rule {
                DetectionRule::AngleMax | DetectionRule::AngleMin => {
                    let h = half_widths[i];
                    (anchor.saturating_sub(h), anchor.saturating_add(h).min(last))
                }
                _ => (previous.unwrap_or(0), anchor),
            };
            previous = Some(anchor);
            i += 1;
            continue;
        }

        // Run of span rules sharing one gap.
        let run_end = (i..rules.len())
            .find(|&j| anchors[j].is_some())
            .unwrap_or(rules.len());
        let lo = previous.unwrap_or(0);
        let hi = anchors.get(run_end).copied().flatten().unwrap_or(last).max(lo);
        split_gap(&rules[i..run_end], series, (lo, hi), &mut spans[i..run_end]);
        i = run_end;
    }

    spans
}

/// Divide `[lo, hi]` among consecutive span rules.
///
/// Leading `angle_range` rules take the longest in-range prefix, trailing
/// ones the longest in-range suffix; increase/decrease rules split what is
/// left evenly. Neighbouring spans share their boundary frame.
fn split_gap(
    rules: &[PhaseRule],
    series: &BTreeMap<&str, Vec<f64>>,
    (lo, hi): Span,
    out: &mut [Span],
) {
    let is_range = |r: &&PhaseRule| r.detection_rule == DetectionRule::AngleRange;
    let lead = rules.iter().take_while(is_range).count();
    let trail = rules[lead..].iter().rev().take_while(is_range).count();
    let middle_end = rules.len() - trail;

    let mut front = lo;
    for k in 0..lead {
        let end = match range_of(&rules[k], series) {
            Some((s, min, max)) => in_range_prefix(s, front, hi, min, max),
            None => front,
        };
        out[k] = (front, end);
        front = end;
    }

    let mut back = hi;
    for k in (middle_end..rules.len()).rev() {
        let start = match range_of(&rules[k], series) {
            Some((s, min, max)) => in_range_suffix(s, back, front, min, max),
            None => back,
        };
        out[k] = (start, back);
        back = start;
    }

    let parts = middle_end - lead;
    if parts > 0 {
        let width = back - front;
        for (offset, k) in (lead..middle_end).enumerate() {
            out[k] = (
                front + width * offset / parts,
                front + width * (offset + 1) / parts,
            );
        }
    }
}

fn range_of<'a>(rule: &PhaseRule, series: &'a BTreeMap<&str, Vec<f64>>) -> Option<(&'a [f64], f64, f64)> {
    let s = series.get(rule.target_angle.as_str())?;
    let min = rule.params.min.unwrap_or(f64::NEG_INFINITY);
    let max = rule.params.max.unwrap_or(f64::INFINITY);
    Some((s.as_slice(), min, max))
}

/// Last index `e` in `from..=limit` with `S[from..=e]` all in `[min, max]`.
fn in_range_prefix(s: &[f64], from: usize, limit: usize, min: f64, max: f64) -> usize {
    let inside = |i: usize| s.get(i).is_some_and(|v| (min..=max).contains(v));
    if !inside(from) {
        return from;
    }
    let mut end = from;
    while end < limit && inside(end + 1) {
        end += 1;
    }
    end
}

/// First index `b` in `limit..=from` with `S[b..=from]` all in `[min, max]`.
fn in_range_suffix(s: &[f64], from: usize, limit: usize, min: f64, max: f64) -> usize {
    let inside = |i: usize| s.get(i).is_some_and(|v| (min..=max).contains(v));
    if !inside(from) {
        return from;
    }
    let mut start = from;
    while start > limit && inside(start - 1) {
        start -= 1;
    }
    start
}
