//! Persisted dashboard preferences: ~/.ipl-dashboard.conf
//!
//! Plain `key=value` lines. Unknown keys are ignored and unreadable values fall
//! back to their defaults, so loading never fails.

use crate::deliveries::DEFAULT_DATASET;
use crate::selection::TopN;
use std::io;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".ipl-dashboard.conf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub dataset: PathBuf,
    pub top_batters: TopN,
    pub top_bowlers: TopN,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            dataset: PathBuf::from(DEFAULT_DATASET),
            top_batters: TopN::default(),
            top_bowlers: TopN::default(),
        }
    }
}

/// Get the config file path: ~/.ipl-dashboard.conf
pub fn config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(CONFIG_FILE))
}

impl DashboardConfig {
    /// Load from the home directory, or defaults when there is no home or no file.
    pub fn load() -> Self {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    fn parse(content: &str) -> Self {
        let mut config = Self::default();
        for line in content.lines() {
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim();
                match key.trim() {
                    "dataset" if !value.is_empty() => config.dataset = PathBuf::from(value),
                    "top_batters" => {
                        if let Ok(n) = value.parse::<usize>() {
                            config.top_batters = TopN::clamped(n);
                        }
                    }
                    "top_bowlers" => {
                        if let Ok(n) = value.parse::<usize>() {
                            config.top_bowlers = TopN::clamped(n);
                        }
                    }
                    _ => {}
                }
            }
        }
        config
    }

    /// Save to the home directory. Failures are logged, not returned.
    pub fn save(&self) {
        if let Some(path) = config_path() {
            if let Err(e) = self.save_to(&path) {
                log::warn!("Could not save settings to {}: {}", path.display(), e);
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let content = format!(
            "dataset={}\ntop_batters={}\ntop_bowlers={}\n",
            self.dataset.display(),
            self.top_batters,
            self.top_bowlers
        );
        std::fs::write(path, content)
    }
}
