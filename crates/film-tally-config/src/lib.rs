pub mod config;
pub mod paths;

pub use config::{Config, ReportConfig, ScraperConfig, DEFAULT_BASE_URL};
pub use paths::PathManager;
