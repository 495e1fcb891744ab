//! Letterboxd list, watchlist and film page scraping
//!
//! Everything here is coupled to Letterboxd's markup: CSS class names on list
//! and film pages, and the `filmData` script on film pages. A markup change on
//! the site degrades detail fields to empty or breaks page probing.

pub mod client;
pub mod details;
mod html;
pub mod list;
pub mod pagination;
pub mod runtime;
pub mod url;

pub use client::LetterboxdClient;
pub use details::parse_film_details;
pub use list::{parse_poster_entries, ListScrape, PosterEntry};
pub use pagination::parse_max_page;
pub use runtime::{FilmDataScript, RuntimeExtractor};
pub use url::{is_valid_url, paginated_url, UrlValidator};
