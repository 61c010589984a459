//! Scoring and title-eligibility engine for engineering growth-framework
//! self-assessments.
//!
//! The [`framework`] module carries the domain model, the weighted scoring
//! engine with diminishing returns for selected specialty tracks, the title
//! resolver, the share-fragment codec, and the assessment session service.
//! [`roster`] turns spreadsheet exports of team self-assessments into scored
//! standings with share links.

pub mod config;
pub mod error;
pub mod framework;
pub mod roster;
pub mod telemetry;
