use crate::error::SourceError;
use scraper::{ElementRef, Html, Selector};

pub(crate) fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Selector {
        selector: css.to_string(),
        message: e.to_string(),
    })
}

/// Concatenated text of an element, trimmed; `None` when blank
pub(crate) fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Text of the first element matching `css`
pub(crate) fn first_text(document: &Html, css: &str) -> Option<String> {
    let sel = selector(css).ok()?;
    document.select(&sel).next().and_then(element_text)
}
