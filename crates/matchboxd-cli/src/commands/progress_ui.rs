use film_tally_models::SourceKind;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner describing which list page is being scraped
///
/// Falls back to structured log lines when not attached to a terminal.
pub struct ProgressUi {
    spinner: ProgressBar,
    interactive: bool,
}

impl ProgressUi {
    pub fn new(quiet: bool) -> Self {
        let interactive = !quiet && is_interactive();

        let spinner = if interactive {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg:.green}")
            {
                spinner.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
            }
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        } else {
            ProgressBar::hidden()
        };

        if !interactive && !quiet {
            tracing::info!(
                operation = "ui_init",
                mode = "non_interactive",
                "Running in non-interactive mode - progress spinner disabled, using structured logging"
            );
        }

        Self {
            spinner,
            interactive,
        }
    }

    pub fn set_page(&self, kind: SourceKind, label: &str, page: u32, total_pages: u32) {
        let msg = match kind {
            SourceKind::Watchlist => format!(
                "Processing the watchlist of {}, page {} of {}...",
                label, page, total_pages
            ),
            SourceKind::List => format!(
                "Processing the list {}, page {} of {}...",
                label, page, total_pages
            ),
        };

        if self.interactive {
            self.spinner.set_message(msg);
        } else {
            tracing::info!(
                operation = "progress",
                source = %label,
                page = page,
                total = total_pages,
                "{}",
                msg
            );
        }
    }

    /// Run `f` (typically printing a message) with the spinner cleared
    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        self.spinner.suspend(f)
    }

    pub fn finish(&self) {
        if self.interactive {
            self.spinner.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
