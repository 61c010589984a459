use serde::{Deserialize, Serialize};

use super::domain::{Milestone, MilestoneMap, SpecialtySelection, TrackId};
use super::scoring::ScoringEngine;

/// Qualification rule for one title. Rules are evaluated in table order, which
/// doubles as ascending seniority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleRule {
    pub name: String,
    #[serde(default)]
    pub min_points: Option<f64>,
    #[serde(default)]
    pub max_points: Option<f64>,
    #[serde(default)]
    pub milestone_floors: Vec<(TrackId, Milestone)>,
    /// Whether diminished specialty points count toward this rule's bounds.
    #[serde(default)]
    pub include_specialties: bool,
}

impl TitleRule {
    fn qualifies(&self, points: f64, map: &MilestoneMap) -> bool {
        if let Some(min) = self.min_points {
            if points < min {
                return false;
            }
        }
        if let Some(max) = self.max_points {
            if points > max {
                return false;
            }
        }
        self.milestone_floors
            .iter()
            .all(|(track, floor)| map.get(*track) >= *floor)
    }
}

fn rule(name: &str, min_points: Option<f64>, max_points: Option<f64>) -> TitleRule {
    TitleRule {
        name: name.to_string(),
        min_points,
        max_points,
        milestone_floors: Vec::new(),
        include_specialties: false,
    }
}

fn leadership_rule(
    name: &str,
    min_points: Option<f64>,
    max_points: Option<f64>,
    floor: u8,
) -> TitleRule {
    TitleRule {
        milestone_floors: vec![(
            TrackId::LeadershipInitiative,
            Milestone::clamped(floor as i64),
        )],
        ..rule(name, min_points, max_points)
    }
}

/// Reference title table. Point ranges are contiguous over the integers the
/// base curve can produce, so every milestone map qualifies for at least one
/// title; the non-emptiness guarantee lives here, not in the resolver.
pub fn reference_rules() -> Vec<TitleRule> {
    vec![
        rule("Engineer I", None, Some(16.0)),
        rule("Engineer II", Some(17.0), Some(35.0)),
        rule("Senior Engineer", Some(36.0), Some(57.0)),
        leadership_rule("Group Lead", Some(36.0), Some(57.0), 2),
        rule("Staff Engineer", Some(58.0), Some(89.0)),
        leadership_rule("Senior Group Lead", Some(58.0), Some(89.0), 3),
        rule("Principal Engineer", Some(90.0), None),
        leadership_rule("Director of Engineering", Some(90.0), None, 4),
    ]
}

/// Maps milestone assignments to the titles they qualify for.
pub struct TitleResolver {
    rules: Vec<TitleRule>,
}

impl TitleResolver {
    pub fn new(rules: Vec<TitleRule>) -> Self {
        Self { rules }
    }

    pub fn reference() -> Self {
        Self::new(reference_rules())
    }

    pub fn rules(&self) -> &[TitleRule] {
        &self.rules
    }

    /// All qualifying titles in table order. Specialty points count toward a
    /// rule's bounds only when the rule opts in.
    pub fn eligible(
        &self,
        engine: &ScoringEngine,
        map: &MilestoneMap,
        selection: &SpecialtySelection,
    ) -> Vec<String> {
        let none = SpecialtySelection::new();
        let base_points = engine.total_points(map, &none);
        let specialty_points = if self.rules.iter().any(|rule| rule.include_specialties) {
            engine.total_points(map, selection)
        } else {
            base_points
        };

        self.rules
            .iter()
            .filter(|rule| {
                let points = if rule.include_specialties {
                    specialty_points
                } else {
                    base_points
                };
                rule.qualifies(points, map)
            })
            .map(|rule| rule.name.clone())
            .collect()
    }

    /// Returns the eligible set and the title to keep: the given one when
    /// still eligible, otherwise the first eligible entry. Every mutation that
    /// can change the eligible set funnels through this.
    pub fn reconcile(
        &self,
        engine: &ScoringEngine,
        map: &MilestoneMap,
        selection: &SpecialtySelection,
        title: &str,
    ) -> (Vec<String>, String) {
        let eligible = self.eligible(engine, map, selection);
        let kept = if eligible.iter().any(|candidate| candidate == title) {
            title.to_string()
        } else {
            eligible
                .first()
                .cloned()
                .unwrap_or_else(|| title.to_string())
        };
        (eligible, kept)
    }
}
