//! Growth-framework core: the track domain model, the weighted scoring engine
//! with diminishing specialty returns, title eligibility, the share-fragment
//! codec, and the assessment session service with its injected persistence
//! seam.

pub mod codec;
pub mod domain;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;
pub mod titles;
pub mod tracks;

#[cfg(test)]
mod tests;

pub use codec::{decode, encode};
pub use domain::{
    Assessment, Category, Milestone, MilestoneMap, SpecialtySelection, TrackId, TRACK_COUNT,
};
pub use report::{build_report, AssessmentReport, CategoryPointsEntry, NextTitleEntry};
pub use router::framework_router;
pub use scoring::{ScoreBreakdown, ScoreComponent, ScoringConfig, ScoringEngine, TrackWeight};
pub use service::AssessmentService;
pub use store::{FragmentStore, StoreError};
pub use titles::{reference_rules, TitleResolver, TitleRule};
pub use tracks::{track, Track, TRACKS};
