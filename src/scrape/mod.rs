// src/scrape/mod.rs
mod catalog;
mod nutrition;

pub use catalog::{collect_catalog, discover_units, scrape_unit};
pub use nutrition::{NutritionCache, NutritionFetcher};
