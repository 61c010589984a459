use serde::Serialize;

use super::domain::{Assessment, Category, MilestoneMap, SpecialtySelection, TrackId};
use super::scoring::ScoringEngine;
use super::titles::TitleResolver;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPointsEntry {
    pub category: Category,
    pub category_label: &'static str,
    pub points: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NextTitleEntry {
    pub name: String,
    pub points_needed: f64,
}

/// Presentation-ready rollup of one assessment: the weighted total, the
/// eligible titles, the gap to the next title step, and per-category totals.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub name: String,
    pub title: String,
    pub total_points: f64,
    pub eligible_titles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_title: Option<NextTitleEntry>,
    pub category_points: Vec<CategoryPointsEntry>,
    pub milestones: MilestoneMap,
}

pub fn build_report(
    engine: &ScoringEngine,
    titles: &TitleResolver,
    assessment: &Assessment,
    selection: &SpecialtySelection,
) -> AssessmentReport {
    let total_points = engine.total_points(&assessment.milestones, selection);
    let eligible_titles = titles.eligible(engine, &assessment.milestones, selection);

    // The gap to each rule is measured against the same point basis the rule
    // itself uses, so specialty-blind rules are not shortened by specialty
    // points they would ignore.
    let none = SpecialtySelection::new();
    let base_points = engine.total_points(&assessment.milestones, &none);
    let next_title = titles
        .rules()
        .iter()
        .filter_map(|rule| rule.min_points.map(|min| (rule, min)))
        .find_map(|(rule, min)| {
            let points = if rule.include_specialties {
                total_points
            } else {
                base_points
            };
            (min > points).then(|| NextTitleEntry {
                name: rule.name.clone(),
                points_needed: min - points,
            })
        });

    let category_points = Category::ordered()
        .iter()
        .map(|category| {
            let subset: Vec<TrackId> = TrackId::ordered()
                .iter()
                .copied()
                .filter(|track| track.category() == *category)
                .collect();
            CategoryPointsEntry {
                category: *category,
                category_label: category.label(),
                points: engine.total_points_in(&assessment.milestones, selection, &subset),
            }
        })
        .collect();

    AssessmentReport {
        name: assessment.name.clone(),
        title: assessment.title.clone(),
        total_points,
        eligible_titles,
        next_title,
        category_points,
        milestones: assessment.milestones.clone(),
    }
}
