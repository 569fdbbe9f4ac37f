// src/csv.rs
//
// Flat projection of a catalog: one CSV row per item, nested parts as JSON text.

use std::io::{self, Write};

use crate::data::{Category, Item, UnitReport};

pub const FLAT_HEADERS: [&str; 18] = [
    "unit_id",
    "unit_name",
    "category_id",
    "category_title",
    "category_guidance",
    "item_detail_id",
    "item_name",
    "description",
    "allergens",
    "serving_display",
    "serving_choices",
    "calories",
    "calories_raw",
    "serving_size",
    "servings_per_container",
    "ingredients_raw",
    "ingredients_list",
    "nutrients",
];

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    w.write_all(b"\r\n") // RFC 4180 record terminator
}

/* ---------------- Projection ---------------- */

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn json_cell<T: serde::Serialize>(v: Option<&T>) -> Result<String, serde_json::Error> {
    v.map(serde_json::to_string).transpose().map(Option::unwrap_or_default)
}

fn flat_row(unit: &UnitReport, cat: &Category, item: &Item) -> Result<Vec<String>, serde_json::Error> {
    let label = item.nutrition.as_deref();
    let ingredients = label.and_then(|l| l.ingredients.as_ref());
    Ok(vec![
        unit.unit_id().to_string(),
        s!(unit.name()),
        opt(cat.category_id),
        cat.title.clone(),
        cat.selection_guidance.clone().unwrap_or_default(),
        opt(item.detail_id),
        item.name.clone(),
        item.description.clone().unwrap_or_default(),
        item.allergens.join("; "),
        item.serving_display.clone().unwrap_or_default(),
        json_cell(item.serving_choices.as_ref())?,
        opt(label.and_then(|l| l.calories)),
        opt(label.and_then(|l| l.calories_raw.as_deref())),
        opt(label.and_then(|l| l.serving_size.as_deref())),
        opt(label.and_then(|l| l.servings_per_container.as_deref())),
        opt(ingredients.map(|i| i.raw.as_str())),
        json_cell(ingredients.and_then(|i| i.list.as_ref()))?,
        json_cell(label.map(|l| &l.nutrients))?,
    ])
}

/// One row per item across all units, in catalog order.
pub fn flatten_items(units: &[UnitReport]) -> Result<Vec<Vec<String>>, serde_json::Error> {
    let mut rows = Vec::new();
    for unit in units {
        for cat in unit.categories() {
            for item in &cat.items {
                rows.push(flat_row(unit, cat, item)?);
            }
        }
    }
    Ok(rows)
}

/// Header plus rows; no rows at all gives an empty string.
pub fn to_csv_string(rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return s!();
    }
    let mut buf: Vec<u8> = Vec::new();
    let headers: Vec<String> = FLAT_HEADERS.iter().map(|h| s!(*h)).collect();
    let _ = write_row(&mut buf, &headers, ',');
    for r in rows {
        let _ = write_row(&mut buf, r, ',');
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
