use serde::{Deserialize, Serialize};
use std::fmt;

/// Optional metadata scraped from a film's detail page
///
/// Every field is independent: a missing element on the page leaves only that
/// field empty. How "missing" is shown is up to the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilmDetails {
    /// Release year as printed on the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    /// First token of the rating meta tag, kept verbatim (e.g. `3.9`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Runtime>,
}

impl FilmDetails {
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.director.is_none()
            && self.tagline.is_none()
            && self.plot.is_none()
            && self.average_rating.is_none()
            && self.runtime.is_none()
    }
}

/// Film running time in whole minutes, displayed as `2h50m`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Runtime(pub u32);

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h{}m", self.0 / 60, self.0 % 60)
    }
}
