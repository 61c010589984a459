use std::io::Read;

use chrono::{DateTime, NaiveDate};

use super::RosterImportError;
use crate::framework::domain::{Milestone, MilestoneMap, TrackId};

#[derive(Debug)]
pub(crate) struct RosterRow {
    pub(crate) name: String,
    pub(crate) assessed_on: Option<NaiveDate>,
    pub(crate) milestones: MilestoneMap,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RosterRow>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let name_column =
        find_column(&headers, "Name").ok_or(RosterImportError::MissingColumn("Name"))?;
    let assessed_column = find_column(&headers, "Assessed At");
    let track_columns: Vec<(TrackId, Option<usize>)> = TrackId::ordered()
        .iter()
        .map(|track| (*track, find_column(&headers, track.label())))
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let name = record.get(name_column).unwrap_or_default().to_string();
        if name.is_empty() {
            continue;
        }

        let assessed_on = assessed_column
            .and_then(|index| record.get(index))
            .and_then(parse_date);

        let mut milestones = MilestoneMap::new();
        for (track, column) in &track_columns {
            let value = column
                .and_then(|index| record.get(index))
                .and_then(|cell| cell.trim().parse::<i64>().ok())
                .unwrap_or(0);
            milestones.set(*track, Milestone::clamped(value));
        }

        rows.push(RosterRow {
            name,
            assessed_on,
            milestones,
        });
    }

    Ok(rows)
}

fn find_column(headers: &csv::StringRecord, wanted: &str) -> Option<usize> {
    let wanted = normalize(wanted);
    headers.iter().position(|header| normalize(header) == wanted)
}

fn normalize(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
