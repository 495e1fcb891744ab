use serde::{Deserialize, Serialize};

/// A film sighted on one or more source lists
///
/// `count` is the number of source lists the film was found on. A record only
/// exists once the film has been sighted, so `count` is always at least 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilmRecord {
    pub film_id: String,
    pub title: String,
    pub link: String,
    pub count: u32,
}

impl FilmRecord {
    /// Record for a first sighting
    pub fn sighted(film_id: impl Into<String>, title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            film_id: film_id.into(),
            title: title.into(),
            link: link.into(),
            count: 1,
        }
    }
}
