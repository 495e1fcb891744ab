use super::progress_ui::ProgressUi;
use crate::output::Output;
use color_eyre::eyre::{bail, eyre, Context};
use color_eyre::Result;
use film_tally_config::{Config, ScraperConfig};
use film_tally_core::{
    default_threshold, filter_by_count, write_csv_file, Aggregate, ConsoleTable, DetailSource,
    FilterOutcome, ReportRow,
};
use film_tally_models::SourceKind;
use film_tally_sources::LetterboxdClient;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What to scrape and how to report it, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub lists: Vec<String>,
    pub users: Vec<String>,
    pub output: Option<PathBuf>,
    pub count: Option<u32>,
    pub fast: bool,
}

impl RunRequest {
    /// Reject requests that can't produce a report before any fetch is made
    pub fn validate(&self) -> Result<()> {
        if self.lists.is_empty() && self.users.is_empty() {
            bail!("At least one --list or --user option must be provided.");
        }

        if let Some(path) = &self.output {
            if !has_csv_extension(path) {
                bail!("Output filename must be a CSV file.");
            }
        }

        Ok(())
    }

    /// List URLs followed by the watchlist URL of each user
    pub fn source_urls(&self, scraper: &ScraperConfig) -> Vec<String> {
        self.lists
            .iter()
            .cloned()
            .chain(self.users.iter().map(|user| scraper.watchlist_url(user)))
            .collect()
    }
}

pub fn has_csv_extension(path: &Path) -> bool {
    path.to_string_lossy().ends_with(".csv")
}

/// Counts from a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Sources requested, valid or not
    pub sources: usize,
    /// Sources that passed validation and were scraped
    pub processed: usize,
    pub threshold: u32,
    pub distinct_films: usize,
    pub reported: usize,
    /// Highest count, when no film met the threshold
    pub fallback_count: Option<u32>,
}

pub async fn run(request: RunRequest, config: Config, output: &Output) -> Result<RunSummary> {
    request.validate()?;

    let urls = request.source_urls(&config.scraper);
    let client = LetterboxdClient::new(config.scraper.clone());
    let ui = ProgressUi::new(output.is_quiet() || !output.is_human());

    let mut aggregate = Aggregate::new();
    let mut processed = 0usize;

    for url in &urls {
        if !client.is_valid_url(url) {
            ui.suspend(|| output.warn(format!("Invalid URL: {}. Skipping...", url)));
            continue;
        }

        let total_pages = match client.probe_page_count(url).await {
            Ok(pages) => pages,
            Err(e) => {
                ui.finish();
                return Err(e)
                    .wrap_err_with(|| format!("Could not determine the number of pages of {}", url));
            }
        };

        let kind = SourceKind::from_url(url);
        let label = kind.label(url);
        debug!(url = %url, kind = ?kind, pages = total_pages, "Scraping source");

        let scrape = client
            .scrape_list(url, kind, total_pages, |page, total| {
                ui.set_page(kind, &label, page, total)
            })
            .await;

        if scrape.pages_failed() > 0 {
            ui.suspend(|| {
                output.warn(format!(
                    "{} of {} pages of {} could not be retrieved",
                    scrape.pages_failed(),
                    total_pages,
                    label
                ))
            });
        }
        if scrape.is_empty() {
            ui.suspend(|| output.warn(format!("No films found in {}", label)));
        }

        aggregate.merge_list(&scrape);
        processed += 1;
    }
    ui.finish();

    let threshold = default_threshold(request.count, urls.len());
    let outcome = filter_by_count(&aggregate, threshold);
    info!(
        threshold = threshold,
        aggregated = aggregate.len(),
        kept = outcome.films.len(),
        "Filtered films"
    );

    if let Some(max_count) = outcome.fallback_count {
        output.warn(format!(
            "No films found with at least {} occurrences. Showing films with highest occurrences ({}):",
            threshold, max_count
        ));
    } else if aggregate.is_empty() {
        output.warn("No films were found in any of the given sources.");
    }

    let details: Option<&dyn DetailSource> = if request.fast {
        None
    } else {
        Some(&client as &dyn DetailSource)
    };

    match &request.output {
        Some(path) => {
            let rows = write_csv_file(path, &outcome.films, details)
                .await
                .map_err(|e| eyre!("{}", e))?;
            output.success(format!("Wrote {} films to {}", rows, path.display()));
        }
        None => print_report(&outcome, details, &config, request.fast, output).await,
    }

    let summary = RunSummary {
        sources: urls.len(),
        processed,
        threshold,
        distinct_films: aggregate.len(),
        reported: outcome.films.len(),
        fallback_count: outcome.fallback_count,
    };
    output.success(format!(
        "Processed {} of {} sources: {} distinct films, {} reported",
        summary.processed, summary.sources, summary.distinct_films, summary.reported
    ));

    Ok(summary)
}

async fn print_report(
    outcome: &FilterOutcome,
    details: Option<&dyn DetailSource>,
    config: &Config,
    fast: bool,
    output: &Output,
) {
    if output.is_human() {
        let table = ConsoleTable::new(config.report.clone(), fast);
        output.table_line(table.header());
        for film in &outcome.films {
            let row = ReportRow::build(film, details).await;
            output.table_line(table.row(&row));
        }
    } else {
        for film in &outcome.films {
            let row = ReportRow::build(film, details).await;
            output.json(&json!({
                "type": "film",
                "film": row.film,
                "details": row.details,
            }));
        }
    }
}
