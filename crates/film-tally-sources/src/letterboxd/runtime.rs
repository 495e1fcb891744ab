use film_tally_models::Runtime;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

use super::html::selector;

/// Pulls the running time out of a parsed film page
///
/// Letterboxd only exposes the runtime in inline script data, so the strategy
/// is kept behind this trait and can be replaced without touching the other
/// detail fields.
pub trait RuntimeExtractor: Send + Sync {
    fn extract(&self, document: &Html) -> Option<Runtime>;
}

const FILM_DATA_MARKER: &str = "var filmData =";

static FILM_DATA_RUNTIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"var filmData = \{.*?runTime: (\d+)").expect("hardcoded regex pattern is valid")
});

/// Reads `runTime` from the `var filmData = { ... }` script block
#[derive(Debug, Default, Clone, Copy)]
pub struct FilmDataScript;

impl FilmDataScript {
    /// Runtime from raw script text
    pub fn runtime_from_script(script: &str) -> Option<Runtime> {
        FILM_DATA_RUNTIME
            .captures(script)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .map(Runtime)
    }
}

impl RuntimeExtractor for FilmDataScript {
    fn extract(&self, document: &Html) -> Option<Runtime> {
        let script_sel = selector("script").ok()?;
        document
            .select(&script_sel)
            .map(|script| script.text().collect::<String>())
            .find(|text| text.contains(FILM_DATA_MARKER))
            .and_then(|text| Self::runtime_from_script(&text))
    }
}
