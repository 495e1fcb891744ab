use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://letterboxd.com";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Site root used to build watchlist URLs and absolute film links
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Fixed pause after every list page fetch
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Column widths for the console table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_title_width")]
    pub title_width: usize,
    #[serde(default = "default_url_width")]
    pub url_width: usize,
    #[serde(default = "default_director_width")]
    pub director_width: usize,
    #[serde(default = "default_plot_width")]
    pub plot_width: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_delay_ms() -> u64 {
    300
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_title_width() -> usize {
    30
}

fn default_url_width() -> usize {
    60
}

fn default_director_width() -> usize {
    20
}

fn default_plot_width() -> usize {
    50
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_delay_ms: default_page_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl ScraperConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Watchlist URL for a username
    pub fn watchlist_url(&self, username: &str) -> String {
        format!("{}/{}/watchlist/", self.base_url.trim_end_matches('/'), username)
    }

    /// Absolute URL for a site-relative path such as `/film/heat-1995/`
    pub fn absolute_url(&self, relative: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if relative.starts_with('/') {
            format!("{}{}", base, relative)
        } else {
            format!("{}/{}", base, relative)
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title_width: default_title_width(),
            url_width: default_url_width(),
            director_width: default_director_width(),
            plot_width: default_plot_width(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = &self.scraper.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "scraper.base_url must start with http:// or https://, got '{}'",
                base_url
            ));
        }

        let widths = [
            ("title_width", self.report.title_width),
            ("url_width", self.report.url_width),
            ("director_width", self.report.director_width),
            ("plot_width", self.report.plot_width),
        ];
        for (name, width) in widths {
            if width == 0 {
                return Err(anyhow::anyhow!("report.{} must be greater than 0", name));
            }
        }

        Ok(())
    }
}
