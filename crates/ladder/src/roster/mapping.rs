use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

use super::parser::RosterRow;
use crate::framework::codec;
use crate::framework::domain::{Assessment, SpecialtySelection};
use crate::framework::scoring::ScoringEngine;
use crate::framework::titles::TitleResolver;

/// One roster member's computed standing.
#[derive(Debug, Clone, Serialize)]
pub struct RosterEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessed_on: Option<NaiveDate>,
    pub total_points: f64,
    pub title: String,
    pub fragment: String,
}

/// Roster-wide standings, sorted by descending points then name.
#[derive(Debug, Clone, Serialize)]
pub struct RosterReport {
    pub entries: Vec<RosterEntry>,
}

pub(crate) fn build_report(
    scoring: &ScoringEngine,
    titles: &TitleResolver,
    rows: Vec<RosterRow>,
) -> RosterReport {
    // Exports carry no specialty selection, so roster scoring is specialty-blind.
    let selection = SpecialtySelection::new();

    let mut entries: Vec<RosterEntry> = rows
        .into_iter()
        .map(|row| {
            let (_, title) = titles.reconcile(scoring, &row.milestones, &selection, "");
            let total_points = scoring.total_points(&row.milestones, &selection);
            let assessment = Assessment {
                name: row.name.clone(),
                milestones: row.milestones,
                title: title.clone(),
                ..Assessment::empty()
            };
            let fragment = codec::encode(&assessment);
            RosterEntry {
                name: row.name,
                assessed_on: row.assessed_on,
                total_points,
                title,
                fragment,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.total_points
            .partial_cmp(&a.total_points)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    RosterReport { entries }
}
