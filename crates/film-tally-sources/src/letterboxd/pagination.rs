use super::html::selector;
use crate::error::SourceError;
use scraper::Html;

/// Highest page number linked from the pagination controls, or 1 when the
/// page has no pagination (a single-page list)
pub fn parse_max_page(html: &str) -> Result<u32, SourceError> {
    let document = Html::parse_document(html);
    let link_sel = selector("div.paginate-pages a")?;

    let max_page = document
        .select(&link_sel)
        .filter_map(|link| {
            let text = link.text().collect::<String>();
            let text = text.trim();
            if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
                text.parse::<u32>().ok()
            } else {
                None
            }
        })
        .max()
        .unwrap_or(0);

    Ok(max_page.max(1))
}
