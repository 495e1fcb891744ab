//! Rendering of the filtered films as a console table or CSV
//!
//! Fast reports use only what the lists provided. Full reports look up each
//! film's details, one page at a time, right before its row is emitted.

pub mod console;
pub mod csv;

pub use console::ConsoleTable;
pub use self::csv::{write_csv, write_csv_file, CSV_HEADER_FAST, CSV_HEADER_FULL};

use crate::enrich::DetailSource;
use film_tally_models::{FilmDetails, FilmRecord};
use std::fmt::Display;

/// Shown in place of any detail field the film page didn't provide
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub film: FilmRecord,
    /// `None` for fast reports
    pub details: Option<FilmDetails>,
}

impl ReportRow {
    pub fn fast(film: &FilmRecord) -> Self {
        Self {
            film: film.clone(),
            details: None,
        }
    }

    /// Row for `film`, enriched when a detail source is given
    pub async fn build(film: &FilmRecord, details: Option<&dyn DetailSource>) -> Self {
        match details {
            Some(source) => Self {
                film: film.clone(),
                details: Some(source.film_details(film).await),
            },
            None => Self::fast(film),
        }
    }

    pub fn year(&self) -> String {
        display_or_na(self.details.as_ref().and_then(|d| d.year.as_deref()))
    }

    pub fn director(&self) -> String {
        display_or_na(self.details.as_ref().and_then(|d| d.director.as_deref()))
    }

    pub fn tagline(&self) -> String {
        display_or_na(self.details.as_ref().and_then(|d| d.tagline.as_deref()))
    }

    pub fn plot(&self) -> String {
        display_or_na(self.details.as_ref().and_then(|d| d.plot.as_deref()))
    }

    pub fn average_rating(&self) -> String {
        display_or_na(self.details.as_ref().and_then(|d| d.average_rating.as_deref()))
    }

    pub fn runtime(&self) -> String {
        display_or_na(self.details.as_ref().and_then(|d| d.runtime))
    }
}

fn display_or_na<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
