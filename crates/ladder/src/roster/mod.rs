//! Roster import: turns a spreadsheet export of team self-assessments into
//! scored standings with share links.

mod mapping;
mod parser;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::framework::scoring::{ScoringConfig, ScoringEngine};
use crate::framework::titles::{TitleResolver, TitleRule};

pub use mapping::{RosterEntry, RosterReport};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::MissingColumn(column) => {
                write!(f, "roster export is missing required column '{}'", column)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::MissingColumn(_) => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Imports roster CSV exports with a fixed scoring rubric and title table.
///
/// Expected columns: `Name`, optionally `Assessed At`, and one column per
/// track display label. Track columns may appear in any order; header
/// matching ignores case and punctuation. Missing track columns and
/// malformed milestone cells read as 0 so a partial export still scores.
pub struct RosterImporter {
    scoring: ScoringEngine,
    titles: TitleResolver,
}

impl RosterImporter {
    pub fn new(config: ScoringConfig, rules: Vec<TitleRule>) -> Self {
        Self {
            scoring: ScoringEngine::new(config),
            titles: TitleResolver::new(rules),
        }
    }

    pub fn with_reference_rules() -> Self {
        Self {
            scoring: ScoringEngine::new(ScoringConfig::reference()),
            titles: TitleResolver::reference(),
        }
    }

    pub fn import<R: Read>(&self, reader: R) -> Result<RosterReport, RosterImportError> {
        let rows = parser::parse_rows(reader)?;
        Ok(mapping::build_report(&self.scoring, &self.titles, rows))
    }

    pub fn import_path(&self, path: &Path) -> Result<RosterReport, RosterImportError> {
        let file = File::open(path)?;
        self.import(file)
    }
}
