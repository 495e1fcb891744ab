use anyhow::Result;
use std::path::PathBuf;

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("matchboxd");

        Ok(Self {
            config_dir: base_dir.clone(),
            log_dir: base_dir.join("logs"),
        })
    }

    /// Paths rooted at an explicit directory instead of the platform config dir
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("matchboxd.log")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // Fall back to the working directory when the platform has no config dir
        Self::new().unwrap_or_else(|_| Self::from_base(".matchboxd"))
    }
}
