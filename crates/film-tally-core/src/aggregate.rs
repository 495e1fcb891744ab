use film_tally_models::FilmRecord;
use film_tally_sources::ListScrape;
use std::collections::HashMap;

/// Films from every processed source, keyed by film id
///
/// Counts are summed across merges. Title and link are taken from the most
/// recent merge since they describe the same film on every list.
#[derive(Debug, Default, Clone)]
pub struct Aggregate {
    films: HashMap<String, FilmRecord>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the film if unseen, then fold its count and latest title/link in
    pub fn upsert(&mut self, film: &FilmRecord) {
        let entry = self
            .films
            .entry(film.film_id.clone())
            .or_insert_with(|| FilmRecord {
                film_id: film.film_id.clone(),
                title: String::new(),
                link: String::new(),
                count: 0,
            });
        entry.title = film.title.clone();
        entry.link = film.link.clone();
        entry.count += film.count;
    }

    pub fn merge<'a, I>(&mut self, films: I)
    where
        I: IntoIterator<Item = &'a FilmRecord>,
    {
        for film in films {
            self.upsert(film);
        }
    }

    /// Merge one list's films
    pub fn merge_list(&mut self, scrape: &ListScrape) {
        self.merge(scrape.films().values());
    }

    pub fn get(&self, film_id: &str) -> Option<&FilmRecord> {
        self.films.get(film_id)
    }

    pub fn films(&self) -> impl Iterator<Item = &FilmRecord> {
        self.films.values()
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    /// Highest count of any film, `None` when nothing was aggregated
    pub fn max_count(&self) -> Option<u32> {
        self.films.values().map(|film| film.count).max()
    }
}
