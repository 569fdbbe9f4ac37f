// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://netnutrition.cbord.com/nn-prod/Duke";
pub const ITEM_PANEL_PATH: &str = "/Unit/SelectUnitFromUnitsList";
pub const LABEL_PATH: &str = "/NutritionDetail/ShowItemNutritionLabel";
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

// Retry: attempts are total, not extra
pub const MAX_ATTEMPTS: u32 = 3;
pub const BACKOFF_STEP_MS: u64 = 1_500; // sleep = step * attempt

// Scrape
pub const ITEM_PANEL_ID: &str = "itemPanel";
pub const LABEL_DELAY_MS: u64 = 100; // be polite, after every label fetch

/// Venues never scraped. Matched on normalized names, so accents and case don't matter.
pub const EXCLUDED_UNIT_NAMES: &[&str] = &[
    "Cafe",
    "Duke Marine Lab",
    "Freeman Cafe",
    "Nasher Museum Cafe",
    "Trinity Cafe",
    "Marketplace",
];

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_JSON_FILE: &str = "netnutrition.json";
pub const DEFAULT_CSV_FILE: &str = "netnutrition_items.csv";

// Local files
pub const LOG_FILE: &str = ".store/debug.log";
pub const DEFAULT_LOG_FILTER: &str = "nn_scrape=info";
