use crate::aggregate::Aggregate;
use film_tally_models::FilmRecord;

/// Films kept by the count filter
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome {
    /// Kept films ordered by count (highest first), then title
    pub films: Vec<FilmRecord>,
    pub threshold: u32,
    /// Set to the highest count when no film met the threshold and the
    /// films with that count were kept instead
    pub fallback_count: Option<u32>,
}

impl FilterOutcome {
    pub fn used_fallback(&self) -> bool {
        self.fallback_count.is_some()
    }
}

/// Threshold to filter with: an explicit positive count, otherwise the number
/// of sources requested (a film has to be on every list)
pub fn default_threshold(requested: Option<u32>, source_count: usize) -> u32 {
    match requested {
        Some(count) if count > 0 => count,
        _ => u32::try_from(source_count).unwrap_or(u32::MAX),
    }
}

/// Keep films with `count >= threshold`
///
/// When that keeps nothing, keep the films whose count equals the highest
/// count in the aggregate instead. The aggregate itself is not modified.
pub fn filter_by_count(aggregate: &Aggregate, threshold: u32) -> FilterOutcome {
    let mut films: Vec<FilmRecord> = aggregate
        .films()
        .filter(|film| film.count >= threshold)
        .cloned()
        .collect();

    let mut fallback_count = None;
    if films.is_empty() {
        if let Some(max_count) = aggregate.max_count() {
            films = aggregate
                .films()
                .filter(|film| film.count == max_count)
                .cloned()
                .collect();
            fallback_count = Some(max_count);
        }
    }

    films.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.title.cmp(&b.title))
            .then_with(|| a.film_id.cmp(&b.film_id))
    });

    FilterOutcome {
        films,
        threshold,
        fallback_count,
    }
}
