use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Fixed set of assessed skill tracks, in declaration order.
///
/// Declaration order is load-bearing: it fixes the positional layout of the
/// share fragment and the circular focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackId {
    Mobile,
    WebClient,
    Foundations,
    Servers,
    ProjectManagement,
    Communication,
    Craft,
    LeadershipInitiative,
    BusinessAcumen,
    AnalyticalThinking,
}

/// Number of tracks in the framework.
pub const TRACK_COUNT: usize = 10;

impl TrackId {
    pub const fn ordered() -> [TrackId; TRACK_COUNT] {
        [
            TrackId::Mobile,
            TrackId::WebClient,
            TrackId::Foundations,
            TrackId::Servers,
            TrackId::ProjectManagement,
            TrackId::Communication,
            TrackId::Craft,
            TrackId::LeadershipInitiative,
            TrackId::BusinessAcumen,
            TrackId::AnalyticalThinking,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            TrackId::Mobile => "Mobile",
            TrackId::WebClient => "Web Client",
            TrackId::Foundations => "Foundations",
            TrackId::Servers => "Servers",
            TrackId::ProjectManagement => "Project Management",
            TrackId::Communication => "Communication",
            TrackId::Craft => "Craft",
            TrackId::LeadershipInitiative => "Leadership & Initiative",
            TrackId::BusinessAcumen => "Business Acumen",
            TrackId::AnalyticalThinking => "Analytical Thinking",
        }
    }

    pub const fn category(self) -> Category {
        match self {
            TrackId::Mobile
            | TrackId::WebClient
            | TrackId::Foundations
            | TrackId::Servers => Category::Technical,
            TrackId::ProjectManagement | TrackId::Craft | TrackId::AnalyticalThinking => {
                Category::Delivery
            }
            TrackId::Communication | TrackId::BusinessAcumen => Category::Support,
            TrackId::LeadershipInitiative => Category::Leadership,
        }
    }
}

/// Grouping used for display and per-category rollups. Never affects scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Technical,
    Delivery,
    Support,
    Leadership,
}

impl Category {
    pub const fn ordered() -> [Category; 4] {
        [
            Category::Technical,
            Category::Delivery,
            Category::Support,
            Category::Leadership,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Category::Technical => "Technical",
            Category::Delivery => "Delivery",
            Category::Support => "Support",
            Category::Leadership => "Leadership",
        }
    }
}

/// Competency level within one track. Always within `[0, 5]`; 0 means the
/// first milestone has not been reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Milestone(u8);

impl Milestone {
    pub const MIN: Milestone = Milestone(0);
    pub const MAX: Milestone = Milestone(5);

    /// Clamps any integer into the valid range rather than rejecting it.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, Self::MAX.0 as i64) as u8)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn shifted(self, delta: i32) -> Self {
        Self::clamped(self.0 as i64 + delta as i64)
    }
}

impl<'de> Deserialize<'de> for Milestone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Ok(Milestone::clamped(raw))
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Total assignment of a milestone to every track. Never partial: absent
/// entries read as milestone 0, and deserialization refills missing tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MilestoneMap(BTreeMap<TrackId, Milestone>);

impl MilestoneMap {
    pub fn new() -> Self {
        Self(
            TrackId::ordered()
                .iter()
                .map(|track| (*track, Milestone::MIN))
                .collect(),
        )
    }

    /// Builds a total map from possibly-partial input.
    pub fn from_partial(entries: BTreeMap<TrackId, Milestone>) -> Self {
        let mut map = Self::new();
        for (track, milestone) in entries {
            map.0.insert(track, milestone);
        }
        map
    }

    pub fn get(&self, track: TrackId) -> Milestone {
        self.0.get(&track).copied().unwrap_or(Milestone::MIN)
    }

    /// Replaces the entry for one track; the only mutation the map supports.
    pub fn set(&mut self, track: TrackId, milestone: Milestone) {
        self.0.insert(track, milestone);
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrackId, Milestone)> + '_ {
        self.0.iter().map(|(track, milestone)| (*track, *milestone))
    }
}

impl Default for MilestoneMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<'de> Deserialize<'de> for MilestoneMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = BTreeMap::<TrackId, Milestone>::deserialize(deserializer)?;
        Ok(Self::from_partial(entries))
    }
}

/// Specialty tracks the assessee has chosen to count toward their score.
/// Contribution order comes from the scoring config's priority list, not from
/// this set.
pub type SpecialtySelection = BTreeSet<TrackId>;

/// Aggregate assessment state: the milestone map plus the free-text name, the
/// selected title, and the focused track.
///
/// The session service keeps `title` inside the eligible set derived from
/// `milestones`; a freshly decoded assessment may carry a stale title until it
/// is reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub milestones: MilestoneMap,
    #[serde(default)]
    pub title: String,
    #[serde(default = "first_track")]
    pub focused_track: TrackId,
}

fn first_track() -> TrackId {
    TrackId::ordered()[0]
}

impl Assessment {
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            milestones: MilestoneMap::new(),
            title: String::new(),
            focused_track: first_track(),
        }
    }
}

impl Default for Assessment {
    fn default() -> Self {
        Self::empty()
    }
}
