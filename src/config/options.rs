// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;
use crate::core::net::RetryPolicy;
use crate::file::looks_like_dir_hint;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

/// Which of the discovered (and not excluded) units to scrape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnitSelector {
    All,
    Ids(Vec<i64>),
}

impl UnitSelector {
    pub fn admits(&self, unit_id: i64) -> bool {
        match self {
            UnitSelector::All => true,
            UnitSelector::Ids(ids) => ids.contains(&unit_id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub base_url: String,
    pub units: UnitSelector,
    pub excluded_names: Vec<String>,
    /// Pause after each nutrition label fetched from the network.
    pub label_delay: Duration,
    pub max_attempts: u32,
    pub backoff_step: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            units: UnitSelector::All,
            excluded_names: EXCLUDED_UNIT_NAMES.iter().map(|n| s!(*n)).collect(),
            label_delay: Duration::from_millis(LABEL_DELAY_MS),
            max_attempts: MAX_ATTEMPTS,
            backoff_step: Duration::from_millis(BACKOFF_STEP_MS),
        }
    }
}

impl ScrapeOptions {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.max_attempts,
            backoff_step: self.backoff_step,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub json_path: PathBuf,
    /// Flat one-row-per-item projection; `None` skips it.
    pub csv_path: Option<PathBuf>,
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        let dir = PathBuf::from(DEFAULT_OUT_DIR);
        Self {
            json_path: dir.join(DEFAULT_JSON_FILE),
            csv_path: Some(dir.join(DEFAULT_CSV_FILE)),
            pretty: true,
        }
    }
}

impl ExportOptions {
    /// Parse user text (CLI flag or GUI field) into the JSON output path.
    /// A directory hint (`out/`) or an existing directory gets the default file name.
    pub fn set_json_path(&mut self, text: &str) {
        if let Some(p) = resolve_path(text, DEFAULT_JSON_FILE) {
            self.json_path = p;
        }
    }

    pub fn set_csv_path(&mut self, text: &str) {
        if let Some(p) = resolve_path(text, DEFAULT_CSV_FILE) {
            self.csv_path = Some(p);
        }
    }
}

fn resolve_path(text: &str, default_file: &str) -> Option<PathBuf> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }
    let p = Path::new(s);
    if looks_like_dir_hint(p) || p.is_dir() {
        Some(p.join(default_file))
    } else {
        Some(p.to_path_buf())
    }
}
