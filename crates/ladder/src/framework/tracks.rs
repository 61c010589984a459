use serde::Serialize;

use super::domain::{Category, TrackId, TRACK_COUNT};

/// Static descriptive metadata for one track. Presentation layers render this;
/// the engine reads only identity, category, and ordering.
#[derive(Debug, Clone, Serialize)]
pub struct Track {
    pub id: TrackId,
    pub display_name: &'static str,
    pub category: Category,
    pub description: &'static str,
}

const fn entry(id: TrackId, description: &'static str) -> Track {
    Track {
        id,
        display_name: id.label(),
        category: id.category(),
        description,
    }
}

/// Pre-authored track table, in fragment order.
pub static TRACKS: [Track; TRACK_COUNT] = [
    entry(
        TrackId::Mobile,
        "Develops expertise in native mobile platform engineering",
    ),
    entry(
        TrackId::WebClient,
        "Develops expertise in web client technologies",
    ),
    entry(
        TrackId::Foundations,
        "Develops expertise in foundational systems: deployments, pipelines, databases",
    ),
    entry(
        TrackId::Servers,
        "Develops expertise in server-side engineering",
    ),
    entry(
        TrackId::ProjectManagement,
        "Delivers well-scoped programs of work on time and within constraints",
    ),
    entry(
        TrackId::Communication,
        "Shares the right amount of information with the right people at the right time",
    ),
    entry(
        TrackId::Craft,
        "Embodies and promotes practices that ensure excellent quality products",
    ),
    entry(
        TrackId::LeadershipInitiative,
        "Challenges the status quo and effects positive organizational change",
    ),
    entry(
        TrackId::BusinessAcumen,
        "Applies understanding of the business to technical decisions",
    ),
    entry(
        TrackId::AnalyticalThinking,
        "Breaks ambiguous problems down with data and structured reasoning",
    ),
];

pub fn track(id: TrackId) -> &'static Track {
    &TRACKS[id as usize]
}
