use super::ReportRow;
use film_tally_config::ReportConfig;

const ELLIPSIS: &str = "...";
const YEAR_WIDTH: usize = 4;
const RATING_WIDTH: usize = 4;
const RUNTIME_WIDTH: usize = 8;
const COUNT_WIDTH: usize = 5;

/// Fixed-width text table
///
/// Long values are cut to the configured width and suffixed with `...`, so
/// each column is padded to its width plus room for the ellipsis. The URL is
/// padded but never cut.
pub struct ConsoleTable {
    widths: ReportConfig,
    fast: bool,
}

impl ConsoleTable {
    pub fn new(widths: ReportConfig, fast: bool) -> Self {
        Self { widths, fast }
    }

    pub fn header(&self) -> String {
        if self.fast {
            self.fast_line("Title", "URL", "Count")
        } else {
            self.full_line(["Title", "URL", "Year", "Director", "Plot", "Rating", "Runtime", "Count"])
        }
    }

    pub fn row(&self, row: &ReportRow) -> String {
        let count = row.film.count.to_string();
        if self.fast {
            return self.fast_line(&row.film.title, &row.film.link, &count);
        }

        let year = row.year();
        let director = row.director();
        let plot = row.plot();
        let rating = row.average_rating();
        let runtime = row.runtime();
        self.full_line([
            &row.film.title,
            &row.film.link,
            &year,
            &director,
            &plot,
            &rating,
            &runtime,
            &count,
        ])
    }

    fn fast_line(&self, title: &str, url: &str, count: &str) -> String {
        let w = &self.widths;
        format!(
            "{:<tw$} {:<uw$} {:>cw$}",
            truncate(title, w.title_width),
            url,
            count,
            tw = w.title_width + ELLIPSIS.len(),
            uw = w.url_width + ELLIPSIS.len(),
            cw = COUNT_WIDTH,
        )
    }

    fn full_line(&self, cols: [&str; 8]) -> String {
        let w = &self.widths;
        let [title, url, year, director, plot, rating, runtime, count] = cols;
        format!(
            "{:<tw$} {:<uw$} {:<yw$} {:<dw$} {:<pw$} {:<rw$} {:<rtw$} {:>cw$}",
            truncate(title, w.title_width),
            url,
            truncate(year, YEAR_WIDTH),
            truncate(director, w.director_width),
            truncate(plot, w.plot_width),
            truncate(rating, RATING_WIDTH),
            truncate(runtime, RUNTIME_WIDTH),
            count,
            tw = w.title_width + ELLIPSIS.len(),
            uw = w.url_width + ELLIPSIS.len(),
            yw = YEAR_WIDTH,
            dw = w.director_width + ELLIPSIS.len(),
            pw = w.plot_width + ELLIPSIS.len(),
            rw = RATING_WIDTH + ELLIPSIS.len(),
            rtw = RUNTIME_WIDTH,
            cw = COUNT_WIDTH,
        )
    }
}

/// First `max_chars` characters of `text`, with `...` appended when cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    // Plot text can span lines on the film page
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}{}", cut, ELLIPSIS)
    } else {
        text
    }
}
