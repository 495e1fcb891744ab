use async_trait::async_trait;
use film_tally_models::{FilmDetails, FilmRecord};
use film_tally_sources::LetterboxdClient;

/// Looks up detail metadata for a reported film
///
/// Lookups never fail: an unavailable page yields empty details.
#[async_trait]
pub trait DetailSource: Send + Sync {
    async fn film_details(&self, film: &FilmRecord) -> FilmDetails;
}

#[async_trait]
impl DetailSource for LetterboxdClient {
    async fn film_details(&self, film: &FilmRecord) -> FilmDetails {
        self.fetch_details(&film.link).await
    }
}
