use super::ReportRow;
use crate::enrich::DetailSource;
use anyhow::{Context, Result};
use csv::Writer;
use film_tally_models::FilmRecord;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

pub const CSV_HEADER_FAST: [&str; 4] = ["Film ID", "Title", "URL", "Count"];
pub const CSV_HEADER_FULL: [&str; 10] = [
    "Film ID",
    "Title",
    "URL",
    "Year",
    "Director",
    "Tagline",
    "Plot",
    "Average Rating",
    "Runtime",
    "Count",
];

/// Write `films` as CSV, looking up details per film when a source is given
///
/// Returns the number of rows written.
pub async fn write_csv<W: Write>(
    films: &[FilmRecord],
    details: Option<&dyn DetailSource>,
    writer: W,
) -> Result<usize> {
    let mut writer = Writer::from_writer(writer);

    if details.is_some() {
        writer.write_record(CSV_HEADER_FULL)?;
    } else {
        writer.write_record(CSV_HEADER_FAST)?;
    }

    for (idx, film) in films.iter().enumerate() {
        let row = ReportRow::build(film, details).await;
        let count = row.film.count.to_string();

        if row.details.is_some() {
            let (year, director, tagline) = (row.year(), row.director(), row.tagline());
            let (plot, rating, runtime) = (row.plot(), row.average_rating(), row.runtime());
            writer.write_record([
                row.film.film_id.as_str(),
                row.film.title.as_str(),
                row.film.link.as_str(),
                year.as_str(),
                director.as_str(),
                tagline.as_str(),
                plot.as_str(),
                rating.as_str(),
                runtime.as_str(),
                count.as_str(),
            ])?;
        } else {
            writer.write_record([
                row.film.film_id.as_str(),
                row.film.title.as_str(),
                row.film.link.as_str(),
                count.as_str(),
            ])?;
        }
        debug!(row = idx + 1, film_id = %row.film.film_id, "Wrote CSV row");
    }

    writer.flush()?;
    Ok(films.len())
}

/// Create (or truncate) `path` and write the report to it
pub async fn write_csv_file(
    path: &Path,
    films: &[FilmRecord],
    details: Option<&dyn DetailSource>,
) -> Result<usize> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let rows = write_csv(films, details, file).await?;
    info!(path = %path.display(), rows = rows, "Wrote CSV report");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::testing::{film, MapDetails};
    use film_tally_models::{FilmDetails, Runtime};
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_fast_csv_round_trip() {
        let films = vec![
            film("51568", "Heat", 2),
            film("2187", "Crouching Tiger, Hidden Dragon", 2),
            film("77", "The \"Best\" Years", 1),
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("films.csv");
        let rows = write_csv_file(&path, &films, None).await.unwrap();
        assert_eq!(rows, 3);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, CSV_HEADER_FAST);

        let mut parsed: HashMap<String, (String, String, u32)> = HashMap::new();
        for record in reader.records() {
            let record = record.unwrap();
            parsed.insert(
                record[0].to_string(),
                (record[1].to_string(), record[2].to_string(), record[3].parse().unwrap()),
            );
        }

        let expected: HashMap<String, (String, String, u32)> = films
            .iter()
            .map(|f| (f.film_id.clone(), (f.title.clone(), f.link.clone(), f.count)))
            .collect();
        assert_eq!(parsed, expected);
    }

    #[tokio::test]
    async fn test_full_csv_enriches_each_film_once() {
        let films = vec![film("1", "Heat", 2), film("2", "Alien", 2)];
        let mut source = MapDetails::default();
        source.details.insert(
            "1".to_string(),
            FilmDetails {
                year: Some("1995".to_string()),
                director: Some("Michael Mann".to_string()),
                tagline: None,
                plot: Some("Cops, robbers.".to_string()),
                average_rating: Some("4.15".to_string()),
                runtime: Some(Runtime(170)),
            },
        );

        let mut buffer = Vec::new();
        write_csv(&films, Some(&source), &mut buffer).await.unwrap();
        assert_eq!(
            *source.lookups.lock().unwrap(),
            vec!["1".to_string(), "2".to_string()]
        );

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, CSV_HEADER_FULL);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].iter().collect::<Vec<_>>(),
            vec![
                "1",
                "Heat",
                "https://letterboxd.com/film/1/",
                "1995",
                "Michael Mann",
                "N/A",
                "Cops, robbers.",
                "4.15",
                "2h50m",
                "2"
            ]
        );
        // Film page unavailable: every detail column falls back
        assert_eq!(&records[1][3], "N/A");
        assert_eq!(&records[1][8], "N/A");
        assert_eq!(&records[1][9], "2");
    }
}
