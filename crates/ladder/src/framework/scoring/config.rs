use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::framework::domain::TrackId;

/// Milestone levels per track, counting the unreached level 0.
pub const MILESTONE_STEPS: usize = 6;

/// Point weighting for one track: a scalar multiplier over the shared default
/// curve, or a fully custom six-entry curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackWeight {
    Scalar(f64),
    Curve([f64; MILESTONE_STEPS]),
}

/// Weighting rubric for the scoring engine.
///
/// `specialty_priority` both marks which tracks are specialties and fixes the
/// order the diminishing-return sequence is applied in. Curves are expected to
/// be non-negative and non-decreasing. An all-zero milestone column makes that
/// milestone's average non-finite; the engine preserves the non-finite value
/// rather than substituting one, so configuration authors see the problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub default_curve: [f64; MILESTONE_STEPS],
    #[serde(default)]
    pub track_weights: BTreeMap<TrackId, TrackWeight>,
    pub specialty_priority: Vec<TrackId>,
    pub diminishing_returns: Vec<f64>,
}

impl ScoringConfig {
    /// Reference rubric: the shared point curve, the three platform tracks as
    /// specialties, and the 100% / 50% / 25% diminishing sequence.
    pub fn reference() -> Self {
        Self {
            default_curve: [0.0, 1.0, 3.0, 6.0, 12.0, 20.0],
            track_weights: BTreeMap::new(),
            specialty_priority: vec![TrackId::Mobile, TrackId::WebClient, TrackId::Servers],
            diminishing_returns: vec![1.0, 0.5, 0.25],
        }
    }
}
