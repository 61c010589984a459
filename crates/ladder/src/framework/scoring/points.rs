use std::collections::BTreeMap;

use super::config::{ScoringConfig, TrackWeight, MILESTONE_STEPS};
use super::{ScoreBreakdown, ScoreComponent};
use crate::framework::domain::{Milestone, MilestoneMap, SpecialtySelection, TrackId};

pub(crate) type CurveTable = BTreeMap<TrackId, [f64; MILESTONE_STEPS]>;

pub(crate) fn build_curves(config: &ScoringConfig) -> CurveTable {
    TrackId::ordered()
        .iter()
        .map(|track| (*track, curve_for(config, *track)))
        .collect()
}

fn curve_for(config: &ScoringConfig, track: TrackId) -> [f64; MILESTONE_STEPS] {
    match config.track_weights.get(&track) {
        Some(TrackWeight::Curve(curve)) => *curve,
        Some(TrackWeight::Scalar(weight)) => {
            let mut curve = config.default_curve;
            for points in &mut curve {
                *points *= weight;
            }
            curve
        }
        None => config.default_curve,
    }
}

pub(crate) fn lookup(curves: &CurveTable, track: TrackId, milestone: Milestone) -> f64 {
    curves
        .get(&track)
        .and_then(|curve| curve.get(milestone.get() as usize))
        .copied()
        .unwrap_or(0.0)
}

/// Scores `subset`: ordinary tracks summed directly, specialty tracks filtered
/// to the selection and walked in priority order with the diminishing sequence
/// applied positionally (zero beyond its length).
pub(crate) fn score_map(
    curves: &CurveTable,
    config: &ScoringConfig,
    map: &MilestoneMap,
    selection: &SpecialtySelection,
    subset: &[TrackId],
) -> ScoreBreakdown {
    let mut components = Vec::new();
    let mut total = 0.0;

    for track in subset {
        if config.specialty_priority.contains(track) {
            continue;
        }
        let milestone = map.get(*track);
        let points = lookup(curves, *track, milestone);
        total += points;
        components.push(ScoreComponent {
            track: *track,
            milestone,
            points,
            diminish_factor: 1.0,
            awarded: points,
        });
    }

    let selected = config
        .specialty_priority
        .iter()
        .filter(|track| selection.contains(*track) && subset.contains(*track));
    for (position, track) in selected.enumerate() {
        let milestone = map.get(*track);
        let points = lookup(curves, *track, milestone);
        let factor = config
            .diminishing_returns
            .get(position)
            .copied()
            .unwrap_or(0.0);
        let awarded = points * factor;
        total += awarded;
        components.push(ScoreComponent {
            track: *track,
            milestone,
            points,
            diminish_factor: factor,
            awarded,
        });
    }

    ScoreBreakdown { components, total }
}

/// Mean ordinary-track points at milestones 1-5. The divisor counts only
/// tracks with a nonzero value at that milestone; an all-zero column divides
/// zero by zero and the NaN is kept.
pub(crate) fn milestone_averages(curves: &CurveTable, config: &ScoringConfig) -> [f64; 5] {
    let ordinary: Vec<TrackId> = TrackId::ordered()
        .iter()
        .copied()
        .filter(|track| !config.specialty_priority.contains(track))
        .collect();

    let mut averages = [0.0; 5];
    for level in 1..MILESTONE_STEPS {
        let values: Vec<f64> = ordinary
            .iter()
            .map(|track| lookup(curves, *track, Milestone::clamped(level as i64)))
            .collect();
        let sum: f64 = values.iter().sum();
        let nonzero = values.iter().filter(|points| **points != 0.0).count();
        averages[level - 1] = sum / nonzero as f64;
    }
    averages
}
