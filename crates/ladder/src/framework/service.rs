use std::sync::Arc;

use tracing::warn;

use super::codec;
use super::domain::{Assessment, Milestone, SpecialtySelection, TrackId};
use super::report::{self, AssessmentReport};
use super::scoring::{ScoringConfig, ScoringEngine};
use super::store::FragmentStore;
use super::titles::{TitleResolver, TitleRule};

/// Session service holding the current assessment and its derived state.
///
/// Every mutation entry point normalizes its input (clamping, substitution)
/// instead of rejecting it, then re-derives the eligible titles and the
/// encoded fragment before returning, so callers never observe a
/// half-updated session. Store failures are logged and the in-memory state
/// stays authoritative.
pub struct AssessmentService<S> {
    scoring: ScoringEngine,
    titles: TitleResolver,
    specialties: SpecialtySelection,
    store: Arc<S>,
    assessment: Assessment,
    eligible: Vec<String>,
    fragment: String,
}

impl<S> AssessmentService<S>
where
    S: FragmentStore,
{
    /// Builds the session from persisted state when the store has any,
    /// otherwise from the empty assessment. A stale persisted title is
    /// reconciled away immediately.
    pub fn new(
        store: Arc<S>,
        scoring_config: ScoringConfig,
        title_rules: Vec<TitleRule>,
        specialties: SpecialtySelection,
    ) -> Self {
        let scoring = ScoringEngine::new(scoring_config);
        let titles = TitleResolver::new(title_rules);

        let assessment = match store.load() {
            Ok(Some(fragment)) => codec::decode(&fragment).unwrap_or_else(Assessment::empty),
            Ok(None) => Assessment::empty(),
            Err(error) => {
                warn!(%error, "failed to load persisted assessment, starting empty");
                Assessment::empty()
            }
        };

        let mut service = Self {
            scoring,
            titles,
            specialties,
            store,
            assessment,
            eligible: Vec::new(),
            fragment: String::new(),
        };
        service.reconcile();
        service
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    pub fn eligible_titles(&self) -> &[String] {
        &self.eligible
    }

    /// The encoded share fragment for the current state.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    pub fn titles(&self) -> &TitleResolver {
        &self.titles
    }

    pub fn specialties(&self) -> &SpecialtySelection {
        &self.specialties
    }

    pub fn total_points(&self) -> f64 {
        self.scoring
            .total_points(&self.assessment.milestones, &self.specialties)
    }

    pub fn report(&self) -> AssessmentReport {
        report::build_report(
            &self.scoring,
            &self.titles,
            &self.assessment,
            &self.specialties,
        )
    }

    /// Replaces the name verbatim; no validation, no length limit.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.assessment.name = name.into();
        self.reconcile();
    }

    /// Replaces one track's milestone and focuses that track. An ineligible
    /// selected title falls back to the first freshly eligible one.
    pub fn set_milestone(&mut self, track: TrackId, milestone: Milestone) {
        self.assessment.milestones.set(track, milestone);
        self.assessment.focused_track = track;
        self.reconcile();
    }

    /// Adopts the title when it is eligible, otherwise silently substitutes
    /// the first eligible title. Never rejects.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.assessment.title = title.into();
        self.reconcile();
    }

    /// Moves focus circularly through the track order, either direction.
    pub fn shift_focus(&mut self, delta: i32) {
        let order = TrackId::ordered();
        let len = order.len() as i32;
        let index = order
            .iter()
            .position(|track| *track == self.assessment.focused_track)
            .unwrap_or(0) as i32;
        let next = (index + delta).rem_euclid(len);
        self.assessment.focused_track = order[next as usize];
        self.reconcile();
    }

    /// Nudges the focused track's milestone by `delta`, clamped to the valid
    /// range.
    pub fn shift_focused_milestone(&mut self, delta: i32) {
        let focused = self.assessment.focused_track;
        let next = self.assessment.milestones.get(focused).shifted(delta);
        self.set_milestone(focused, next);
    }

    fn reconcile(&mut self) {
        let (eligible, title) = self.titles.reconcile(
            &self.scoring,
            &self.assessment.milestones,
            &self.specialties,
            &self.assessment.title,
        );
        self.assessment.title = title;
        self.eligible = eligible;
        self.fragment = codec::encode(&self.assessment);
        if let Err(error) = self.store.save(&self.fragment) {
            warn!(%error, "failed to persist assessment fragment");
        }
    }
}
