pub mod aggregate;
pub mod enrich;
pub mod filter;
pub mod report;

pub use aggregate::Aggregate;
pub use enrich::DetailSource;
pub use filter::{default_threshold, filter_by_count, FilterOutcome};
pub use report::{write_csv, write_csv_file, ConsoleTable, ReportRow, NOT_AVAILABLE};
