use super::html::selector;
use crate::error::SourceError;
use film_tally_models::FilmRecord;
use scraper::Html;
use std::collections::HashMap;
use tracing::debug;

/// One poster on a list page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterEntry {
    pub film_id: String,
    pub title: String,
    /// Site-relative link to the film's detail page
    pub target_link: String,
}

/// Extract every poster entry from a list or watchlist page
///
/// Entries missing a film id, a link or an image alt text are skipped.
pub fn parse_poster_entries(html: &str) -> Result<Vec<PosterEntry>, SourceError> {
    let document = Html::parse_document(html);
    let poster_sel = selector(r#"div[class*="really-lazy-load poster"]"#)?;
    let image_sel = selector("img.image")?;

    let mut entries = Vec::new();
    for poster in document.select(&poster_sel) {
        let attrs = poster.value();
        let Some(film_id) = attrs.attr("data-film-id").filter(|id| !id.is_empty()) else {
            debug!("Skipping poster without data-film-id");
            continue;
        };
        let Some(target_link) = attrs
            .attr("data-target-link")
            .or_else(|| attrs.attr("data-item-link"))
        else {
            debug!(film_id = %film_id, "Skipping poster without target link");
            continue;
        };
        let Some(title) = poster
            .select(&image_sel)
            .next()
            .and_then(|img| img.value().attr("alt"))
        else {
            debug!(film_id = %film_id, "Skipping poster without image alt text");
            continue;
        };

        entries.push(PosterEntry {
            film_id: film_id.to_string(),
            title: title.to_string(),
            target_link: target_link.to_string(),
        });
    }

    Ok(entries)
}

/// Films found on a single list, keyed by film id
///
/// A film counts once per list no matter how many pages it shows up on;
/// repeat sightings refresh the title and link and are tallied separately.
#[derive(Debug, Default, Clone)]
pub struct ListScrape {
    films: HashMap<String, FilmRecord>,
    duplicate_sightings: usize,
    pages_fetched: u32,
    pages_failed: u32,
}

impl ListScrape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sighting; returns true when the film is new to this list
    pub fn record(&mut self, film_id: &str, title: &str, link: &str) -> bool {
        match self.films.get_mut(film_id) {
            Some(existing) => {
                existing.title = title.to_string();
                existing.link = link.to_string();
                self.duplicate_sightings += 1;
                false
            }
            None => {
                self.films
                    .insert(film_id.to_string(), FilmRecord::sighted(film_id, title, link));
                true
            }
        }
    }

    pub(crate) fn record_page(&mut self, fetched: bool) {
        if fetched {
            self.pages_fetched += 1;
        } else {
            self.pages_failed += 1;
        }
    }

    pub fn films(&self) -> &HashMap<String, FilmRecord> {
        &self.films
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    pub fn duplicate_sightings(&self) -> usize {
        self.duplicate_sightings
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    pub fn pages_failed(&self) -> u32 {
        self.pages_failed
    }
}
