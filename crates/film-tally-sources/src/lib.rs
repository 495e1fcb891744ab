pub mod error;
pub mod fetch;
pub mod letterboxd;
pub mod progress;

pub use error::SourceError;
pub use fetch::{create_http_client, HttpFetcher, PageFetcher};
pub use letterboxd::{
    is_valid_url, paginated_url, FilmDataScript, LetterboxdClient, ListScrape, RuntimeExtractor,
    UrlValidator,
};
pub use progress::ProgressTracker;
