mod config;
mod points;

pub use config::{ScoringConfig, TrackWeight, MILESTONE_STEPS};

use serde::Serialize;

use super::domain::{Milestone, MilestoneMap, SpecialtySelection, TrackId};

/// Stateless engine applying a weighting rubric to milestone assignments.
///
/// Per-track curves and the per-milestone averages are materialized once at
/// construction; everything else is a lookup over them.
pub struct ScoringEngine {
    config: ScoringConfig,
    curves: points::CurveTable,
    averages: [f64; 5],
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        let curves = points::build_curves(&config);
        let averages = points::milestone_averages(&curves, &config);
        Self {
            config,
            curves,
            averages,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn is_specialty(&self, track: TrackId) -> bool {
        self.config.specialty_priority.contains(&track)
    }

    /// Point value for one track at one milestone. Lookup misses score zero.
    pub fn points_for_track(&self, track: TrackId, milestone: Milestone) -> f64 {
        points::lookup(&self.curves, track, milestone)
    }

    pub fn total_points(&self, map: &MilestoneMap, selection: &SpecialtySelection) -> f64 {
        self.score_breakdown_in(map, selection, &TrackId::ordered())
            .total
    }

    pub fn total_points_in(
        &self,
        map: &MilestoneMap,
        selection: &SpecialtySelection,
        subset: &[TrackId],
    ) -> f64 {
        self.score_breakdown_in(map, selection, subset).total
    }

    pub fn score_breakdown(
        &self,
        map: &MilestoneMap,
        selection: &SpecialtySelection,
    ) -> ScoreBreakdown {
        self.score_breakdown_in(map, selection, &TrackId::ordered())
    }

    pub fn score_breakdown_in(
        &self,
        map: &MilestoneMap,
        selection: &SpecialtySelection,
        subset: &[TrackId],
    ) -> ScoreBreakdown {
        points::score_map(&self.curves, &self.config, map, selection, subset)
    }

    /// Mean ordinary-track points at milestones 1-5, averaged over the tracks
    /// with a nonzero value at that milestone. An all-zero column yields a
    /// non-finite mean, preserved for the configuration author to notice.
    pub fn average_points_per_milestone(&self) -> [f64; 5] {
        self.averages
    }

    /// Lower-bound score estimate from per-level track counts ("how many
    /// tracks sit at or above milestone N"). Counts are taken modulo the track
    /// count purely as a guard against out-of-range callers, and a non-finite
    /// average contributes nothing.
    pub fn estimate_min_points(&self, counts_per_milestone: &[u32]) -> i64 {
        let track_count = TrackId::ordered().len() as u32;
        let estimate: f64 = counts_per_milestone
            .iter()
            .zip(self.averages.iter())
            .map(|(count, average)| {
                let average = if average.is_finite() { *average } else { 0.0 };
                f64::from(count % track_count) * average
            })
            .sum();
        estimate.floor() as i64
    }
}

/// One track's contribution, with the diminish factor that was applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub track: TrackId,
    pub milestone: Milestone,
    pub points: f64,
    pub diminish_factor: f64,
    pub awarded: f64,
}

/// Transparent scoring result: per-track components plus the weighted total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    pub total: f64,
}
