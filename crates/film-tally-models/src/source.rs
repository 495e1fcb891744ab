use serde::{Deserialize, Serialize};

/// What kind of page a source URL points at
///
/// Only affects how progress is described to the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SourceKind {
    Watchlist,
    List,
}

impl SourceKind {
    /// Watchlist URLs are recognised by the `watchlist` path segment
    pub fn from_url(url: &str) -> Self {
        if url.contains("watchlist") {
            SourceKind::Watchlist
        } else {
            SourceKind::List
        }
    }

    /// Human-readable label for a source URL: the username for a watchlist,
    /// the list slug for a curated list
    pub fn label(&self, url: &str) -> String {
        let segments: Vec<&str> = url
            .trim_end_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let label = match self {
            // https://letterboxd.com/<user>/watchlist
            SourceKind::Watchlist => segments
                .iter()
                .position(|s| *s == "watchlist")
                .and_then(|idx| idx.checked_sub(1))
                .and_then(|idx| segments.get(idx)),
            SourceKind::List => segments.last(),
        };

        label.map(|s| s.to_string()).unwrap_or_else(|| url.to_string())
    }
}
