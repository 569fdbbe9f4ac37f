// src/data.rs
//
// Catalog entities, shaped exactly like the exported JSON document.
//
// Item fields that came back empty are left out of the output; every other
// optional field is written as `null` so consumers see a stable shape.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A dining venue.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Unit {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Category {
    pub category_id: Option<i64>,
    pub title: String,
    pub selection_guidance: Option<String>,
    pub raw_title: String,
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allergens: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_display: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_choices: Option<ServingChoice>,
    /// Shared with every other item carrying the same detail id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Arc<NutritionLabel>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServingChoice {
    Static { value: String },
    #[serde(rename = "select")]
    Selectable { options: Vec<ServingOption> },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ServingOption {
    pub label: String,
    pub raw_value: Option<String>,
    /// `raw_value / 100` when it is numeric.
    pub servings: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NutritionLabel {
    pub label_name: Option<String>,
    pub servings_per_container: Option<String>,
    pub serving_size: Option<String>,
    pub calories: Option<i64>,
    pub calories_raw: Option<String>,
    pub nutrients: Vec<NutrientRow>,
    pub ingredients: Option<Ingredients>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NutrientRow {
    pub key: String,
    pub label: String,
    pub amount: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub daily_value_percent: Option<f64>,
    pub daily_value_raw: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ingredients {
    pub raw: String,
    pub list: Option<Vec<String>>,
}

/// Outcome of one venue. A failed venue keeps its place in the output with
/// the error message and no categories.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UnitReport {
    Scraped {
        unit_id: i64,
        name: String,
        category_count: usize,
        item_count: usize,
        categories: Vec<Category>,
    },
    Failed {
        unit_id: i64,
        name: String,
        error: String,
        categories: Vec<Category>,
    },
}

impl UnitReport {
    pub fn scraped(unit: &Unit, categories: Vec<Category>) -> Self {
        let item_count = categories.iter().map(|c| c.items.len()).sum();
        UnitReport::Scraped {
            unit_id: unit.id,
            name: unit.name.clone(),
            category_count: categories.len(),
            item_count,
            categories,
        }
    }

    pub fn failed(unit: &Unit, error: impl Into<String>) -> Self {
        UnitReport::Failed {
            unit_id: unit.id,
            name: unit.name.clone(),
            error: error.into(),
            categories: Vec::new(),
        }
    }

    pub fn unit_id(&self) -> i64 {
        match self {
            UnitReport::Scraped { unit_id, .. } | UnitReport::Failed { unit_id, .. } => *unit_id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            UnitReport::Scraped { name, .. } | UnitReport::Failed { name, .. } => name,
        }
    }

    pub fn categories(&self) -> &[Category] {
        match self {
            UnitReport::Scraped { categories, .. } | UnitReport::Failed { categories, .. } => categories,
        }
    }

    pub fn item_count(&self) -> usize {
        match self {
            UnitReport::Scraped { item_count, .. } => *item_count,
            UnitReport::Failed { .. } => 0,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            UnitReport::Failed { error, .. } => Some(error),
            UnitReport::Scraped { .. } => None,
        }
    }
}

/// The whole run, as written to disk.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Catalog {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    /// Units attempted, failures included.
    pub units_total: usize,
    pub units_skipped: Vec<String>,
    pub items_total: usize,
    pub excluded_names: Vec<String>,
    pub units: Vec<UnitReport>,
}

/// Result of scanning the homepage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Discovery {
    /// Every distinct named unit, document order.
    pub discovered: Vec<Unit>,
    /// `discovered` minus the excluded ones.
    pub units: Vec<Unit>,
    /// Names of the excluded units, document order.
    pub skipped: Vec<String>,
}
