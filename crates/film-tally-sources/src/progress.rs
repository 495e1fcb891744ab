use std::collections::HashMap;
use tracing::{info, warn};

/// Counts fetch outcomes for a sequence of pages and logs a summary
pub struct ProgressTracker {
    total: usize,
    fetched: usize,
    failed: usize,
    start_time: std::time::Instant,
    error_counts: HashMap<String, usize>,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            fetched: 0,
            failed: 0,
            start_time: std::time::Instant::now(),
            error_counts: HashMap::new(),
        }
    }

    pub fn record_fetched(&mut self) {
        self.fetched += 1;
    }

    /// Record a failed fetch, grouped by error category in the summary
    pub fn record_failed(&mut self, error_category: &str) {
        self.failed += 1;
        *self.error_counts.entry(error_category.to_string()).or_insert(0) += 1;
    }

    pub fn fetched(&self) -> usize {
        self.fetched
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn log_summary(&self, operation_name: &str) {
        let elapsed = self.start_time.elapsed();
        if self.failed > 0 {
            warn!(
                "{} completed: {} total in {:.1}s | Fetched: {} | Failed: {}",
                operation_name,
                self.total,
                elapsed.as_secs_f64(),
                self.fetched,
                self.failed
            );

            let mut error_entries: Vec<_> = self.error_counts.iter().collect();
            error_entries.sort_by(|a, b| b.1.cmp(a.1));
            let error_summary: Vec<String> = error_entries
                .iter()
                .map(|(category, count)| format!("{}: {}", category, count))
                .collect();
            info!("Error breakdown: {}", error_summary.join(", "));
        } else {
            info!(
                "{} completed: {} total in {:.1}s | Fetched: {}",
                operation_name,
                self.total,
                elapsed.as_secs_f64(),
                self.fetched
            );
        }
    }
}
