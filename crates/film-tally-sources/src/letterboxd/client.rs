use super::details::parse_film_details;
use super::list::{parse_poster_entries, ListScrape};
use super::pagination::parse_max_page;
use super::runtime::{FilmDataScript, RuntimeExtractor};
use super::url::{paginated_url, UrlValidator};
use crate::error::SourceError;
use crate::fetch::{HttpFetcher, PageFetcher};
use crate::progress::ProgressTracker;
use film_tally_config::ScraperConfig;
use film_tally_models::{FilmDetails, SourceKind};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sequential scraper for Letterboxd lists, watchlists and film pages
///
/// All fetches are issued one at a time. List pages are followed by the
/// configured fixed delay; film pages are not.
pub struct LetterboxdClient {
    fetcher: Arc<dyn PageFetcher>,
    config: ScraperConfig,
    urls: UrlValidator,
    runtime: Box<dyn RuntimeExtractor>,
}

impl LetterboxdClient {
    pub fn new(config: ScraperConfig) -> Self {
        let fetcher = Arc::new(HttpFetcher::new(&config.user_agent));
        Self::with_fetcher(config, fetcher)
    }

    pub fn with_fetcher(config: ScraperConfig, fetcher: Arc<dyn PageFetcher>) -> Self {
        let urls = UrlValidator::for_base_url(&config.base_url).unwrap_or_else(|e| {
            warn!(
                base_url = %config.base_url,
                error = %e,
                "Unusable base URL, validating against letterboxd.com"
            );
            UrlValidator::default()
        });
        Self {
            fetcher,
            config,
            urls,
            runtime: Box::new(FilmDataScript),
        }
    }

    pub fn with_runtime_extractor(mut self, runtime: Box<dyn RuntimeExtractor>) -> Self {
        self.runtime = runtime;
        self
    }

    /// Whether `url` is a page on the configured site
    pub fn is_valid_url(&self, url: &str) -> bool {
        self.urls.is_valid(url)
    }

    /// Number of pages in a list
    ///
    /// Any fetch failure is returned to the caller: nothing else about the
    /// list can be scraped without it.
    pub async fn probe_page_count(&self, url: &str) -> Result<u32, SourceError> {
        let body = self.fetcher.fetch(url).await?;
        let pages = parse_max_page(&body)?;
        debug!(url = %url, pages = pages, "Probed list pagination");
        Ok(pages)
    }

    /// Scrape pages `1..=total_pages` of a list
    ///
    /// A page that fails to load is logged and skipped. `on_page` is called
    /// with `(page, total_pages)` before each fetch.
    pub async fn scrape_list<P>(
        &self,
        url: &str,
        kind: SourceKind,
        total_pages: u32,
        mut on_page: P,
    ) -> ListScrape
    where
        P: FnMut(u32, u32),
    {
        let label = kind.label(url);
        let mut scrape = ListScrape::new();
        let mut tracker = ProgressTracker::new(total_pages as usize);

        for page in 1..=total_pages {
            on_page(page, total_pages);
            let page_url = paginated_url(url, page);

            match self.fetcher.fetch(&page_url).await {
                Ok(body) => match parse_poster_entries(&body) {
                    Ok(entries) => {
                        debug!(url = %page_url, films = entries.len(), "Parsed list page");
                        for entry in entries {
                            let link = self.config.absolute_url(&entry.target_link);
                            scrape.record(&entry.film_id, &entry.title, &link);
                        }
                        scrape.record_page(true);
                        tracker.record_fetched();
                    }
                    Err(e) => {
                        warn!(url = %page_url, error = %e, "Failed to parse list page, skipping");
                        scrape.record_page(false);
                        tracker.record_failed("parse");
                    }
                },
                Err(e) => {
                    warn!(url = %page_url, error = %e, "Failed to retrieve list page, skipping");
                    scrape.record_page(false);
                    let category = e
                        .status()
                        .map(|status| format!("HTTP {}", status))
                        .unwrap_or_else(|| "request".to_string());
                    tracker.record_failed(&category);
                }
            }

            tokio::time::sleep(self.config.page_delay()).await;
        }

        if scrape.duplicate_sightings() > 0 {
            debug!(
                list = %label,
                duplicates = scrape.duplicate_sightings(),
                "Films seen more than once within the same list"
            );
        }
        let operation = match kind {
            SourceKind::Watchlist => format!("Watchlist of {}", label),
            SourceKind::List => format!("List {}", label),
        };
        tracker.log_summary(&operation);
        info!(list = %label, films = scrape.len(), "Scraped list");

        scrape
    }

    /// Metadata for a single film page; empty when the page can't be fetched
    pub async fn fetch_details(&self, film_url: &str) -> FilmDetails {
        match self.fetcher.fetch(film_url).await {
            Ok(body) => parse_film_details(&body, self.runtime.as_ref()),
            Err(e) => {
                warn!(url = %film_url, error = %e, "Failed to retrieve film page");
                FilmDetails::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use film_tally_models::Runtime;
    use scraper::Html;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> ScraperConfig {
        ScraperConfig {
            base_url: base_url.to_string(),
            page_delay_ms: 0,
            ..ScraperConfig::default()
        }
    }

    fn list_page(films: &[(&str, &str, &str)]) -> String {
        let posters: String = films
            .iter()
            .map(|(id, slug, title)| {
                format!(
                    r#"<li><div class="really-lazy-load poster film-poster" data-film-id="{}" data-target-link="/film/{}/"><img class="image" alt="{}" /></div></li>"#,
                    id, slug, title
                )
            })
            .collect();
        format!(r#"<html><body><ul class="poster-list">{}</ul></body></html>"#, posters)
    }

    #[tokio::test]
    async fn test_probe_page_count() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dave/list/noir/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<div class="paginate-pages"><a href="/dave/list/noir/page/2/">2</a><a href="/dave/list/noir/page/3/">3</a></div>"#,
            ))
            .mount(&mock_server)
            .await;

        let client = LetterboxdClient::new(test_config(&mock_server.uri()));
        let pages = client
            .probe_page_count(&format!("{}/dave/list/noir/", mock_server.uri()))
            .await
            .unwrap();
        assert_eq!(pages, 3);
    }

    #[tokio::test]
    async fn test_probe_failure_is_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = LetterboxdClient::new(test_config(&mock_server.uri()));
        let err = client
            .probe_page_count(&format!("{}/dave/list/noir/", mock_server.uri()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_scrape_fetches_each_page_once() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dave/list/noir/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(list_page(&[("1", "m", "M")])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dave/list/noir/page/2/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(list_page(&[("2", "laura", "Laura")])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dave/list/noir/page/3/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(list_page(&[("3", "the-third-man", "The Third Man")])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = LetterboxdClient::new(test_config(&mock_server.uri()));
        let url = format!("{}/dave/list/noir/", mock_server.uri());
        let mut seen_pages = Vec::new();
        let scrape = client
            .scrape_list(&url, SourceKind::List, 3, |page, total| seen_pages.push((page, total)))
            .await;

        assert_eq!(seen_pages, vec![(1, 3), (2, 3), (3, 3)]);
        assert_eq!(scrape.len(), 3);
        assert_eq!(scrape.pages_fetched(), 3);
        assert_eq!(
            scrape.films()["2"].link,
            format!("{}/film/laura/", mock_server.uri())
        );
        assert_eq!(scrape.films()["3"].title, "The Third Man");
    }

    #[tokio::test]
    async fn test_scrape_skips_failed_page() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dave/watchlist/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(list_page(&[("1", "m", "M")])),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dave/watchlist/page/2/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = LetterboxdClient::new(test_config(&mock_server.uri()));
        let url = format!("{}/dave/watchlist/", mock_server.uri());
        let scrape = client.scrape_list(&url, SourceKind::Watchlist, 2, |_, _| {}).await;

        assert_eq!(scrape.len(), 1);
        assert_eq!(scrape.pages_fetched(), 1);
        assert_eq!(scrape.pages_failed(), 1);
    }

    #[tokio::test]
    async fn test_film_repeated_across_pages_counts_once() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dave/list/noir/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(list_page(&[("1", "m", "M")])),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dave/list/noir/page/2/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(list_page(&[("1", "m", "M"), ("2", "laura", "Laura")])),
            )
            .mount(&mock_server)
            .await;

        let client = LetterboxdClient::new(test_config(&mock_server.uri()));
        let url = format!("{}/dave/list/noir/", mock_server.uri());
        let scrape = client.scrape_list(&url, SourceKind::List, 2, |_, _| {}).await;

        assert_eq!(scrape.len(), 2);
        assert_eq!(scrape.films()["1"].count, 1);
        assert_eq!(scrape.duplicate_sightings(), 1);
    }

    #[tokio::test]
    async fn test_fetch_details() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/film/heat-1995/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><head><script>var filmData = { id: 1, runTime: 170 };</script></head>
                   <body><div class="releaseyear">1995</div></body></html>"#,
            ))
            .mount(&mock_server)
            .await;

        let client = LetterboxdClient::new(test_config(&mock_server.uri()));
        let details = client
            .fetch_details(&format!("{}/film/heat-1995/", mock_server.uri()))
            .await;
        assert_eq!(details.year.as_deref(), Some("1995"));
        assert_eq!(details.runtime, Some(Runtime(170)));
        assert_eq!(details.tagline, None);
    }

    #[test]
    fn test_is_valid_url_uses_base_url() {
        let client = LetterboxdClient::new(test_config("http://127.0.0.1:4000"));
        assert!(client.is_valid_url("http://127.0.0.1:4000/dave/watchlist/"));
        assert!(!client.is_valid_url("https://letterboxd.com/dave/watchlist/"));

        let client = LetterboxdClient::new(ScraperConfig::default());
        assert!(client.is_valid_url("https://letterboxd.com/dave/watchlist/"));
    }

    struct NoRuntime;

    impl RuntimeExtractor for NoRuntime {
        fn extract(&self, _document: &Html) -> Option<Runtime> {
            None
        }
    }

    #[tokio::test]
    async fn test_fetch_details_with_runtime_extractor() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/film/heat-1995/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><head><script>var filmData = { id: 1, runTime: 170 };</script></head>
                   <body><div class="releaseyear">1995</div></body></html>"#,
            ))
            .mount(&mock_server)
            .await;

        let client = LetterboxdClient::new(test_config(&mock_server.uri()))
            .with_runtime_extractor(Box::new(NoRuntime));
        let details = client
            .fetch_details(&format!("{}/film/heat-1995/", mock_server.uri()))
            .await;
        assert_eq!(details.runtime, None);
        assert_eq!(details.year.as_deref(), Some("1995"));
    }

    #[tokio::test]
    async fn test_fetch_details_failure_is_empty() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = LetterboxdClient::new(test_config(&mock_server.uri()));
        let details = client
            .fetch_details(&format!("{}/film/missing/", mock_server.uri()))
            .await;
        assert!(details.is_empty());
    }
}
