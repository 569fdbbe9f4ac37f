// src/specs/panel.rs
//
// Item panel of one unit: menu tables → categories and items.
//
// Layout, as served:
//   <table> … "Item Name" header …
//     <tr class="cbo_nn_itemGroupRow" onclick="toggleCourseItems(this, 123)">Entrees (Choose 1)</tr>
//     <tr data-categoryid="123"> action | name | serving | serving choices </tr>
//   </table>
// Nested tables inside cells are ignored: only rows whose nearest table is a
// menu table count.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::config::consts::ITEM_PANEL_ID;
use crate::core::html::{Child, Document, Node};
use crate::core::sanitize::{non_empty, split_guidance};
use crate::data::{Category, Item, NutritionLabel};
use crate::error::ScrapeError;
use crate::specs::servings::parse_serving_choices;

const MENU_TABLE_MARKER: &str = "Item Name";
const GROUP_ROW: &str = "cbo_nn_itemGroupRow";
const CATEGORY_ATTR: &str = "data-categoryid";
const DETAIL_ATTR: &str = "data-detailoid";
const ITEM_ANCHOR: &str = "cbo_nn_itemHover";

static_regex! {
    static CATEGORY_ID = r"toggleCourseItems\([^,]+,\s*([0-9]+)\)";
}
static_regex! {
    static DIGITS = r"[0-9]+";
}
static_regex! {
    static DESCRIPTION_CLASS = r"(?i)description";
}

/// Where item rows get their nutrition from.
pub trait NutritionLookup {
    fn nutrition(&mut self, detail_id: i64) -> Result<Arc<NutritionLabel>, ScrapeError>;
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    panels: Vec<PanelPart>,
}

#[derive(Deserialize)]
struct PanelPart {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    html: Option<String>,
}

/// Pull the item panel markup out of the JSON reply to a unit selection.
/// No item panel → empty markup.
pub fn item_panel_html(payload: &str) -> Result<String, ScrapeError> {
    let envelope: Envelope = serde_json::from_str(payload).map_err(ScrapeError::Payload)?;
    let html = envelope
        .panels
        .into_iter()
        .find(|p| p.id.as_deref() == Some(ITEM_PANEL_ID))
        .and_then(|p| p.html)
        .unwrap_or_default();
    Ok(html_escape::decode_html_entities(&html).into_owned())
}

pub fn parse_panel<L: NutritionLookup + ?Sized>(
    markup: &str,
    lookup: &mut L,
) -> Result<Vec<Category>, ScrapeError> {
    let doc = Document::fragment(markup);
    parse_panel_in(doc.root(), lookup)
}

pub fn parse_panel_in<'a, N: Node<'a>, L: NutritionLookup + ?Sized>(
    root: N,
    lookup: &mut L,
) -> Result<Vec<Category>, ScrapeError> {
    let mut categories: Vec<Category> = Vec::new();
    // category id (as text) → index in `categories`
    let mut by_id: HashMap<String, usize> = HashMap::new();

    let tables = root.find_all(|n| n.is_tag("table") && n.text_content().contains(MENU_TABLE_MARKER));
    for table in tables {
        let rows = table.find_all(|n| n.is_tag("tr") && n.nearest("table").is_some_and(|t| t.same_node(&table)));
        for row in rows {
            if row.has_class(GROUP_ROW) {
                let category = build_category(row);
                if let Some(id) = category.category_id {
                    by_id.insert(id.to_string(), categories.len());
                }
                categories.push(category);
            } else if let Some(cat_id) = row.get_attr(CATEGORY_ATTR) {
                let target = by_id.get(cat_id).copied().or(categories.len().checked_sub(1));
                let Some(ix) = target else {
                    logd!("item row before any category (categoryid {cat_id}), dropped");
                    continue;
                };
                if let Some(item) = build_item(row, lookup)? {
                    categories[ix].items.push(item);
                }
            }
        }
    }

    categories.retain(|c| !c.items.is_empty());
    Ok(categories)
}

fn build_category<'a, N: Node<'a>>(row: N) -> Category {
    let raw_title = row.text_content();
    let category_id = row
        .get_attr("onclick")
        .and_then(|js| CATEGORY_ID.captures(js))
        .and_then(|c| c[1].parse().ok());
    let (title, selection_guidance) = split_guidance(&raw_title);
    Category { category_id, title, selection_guidance, raw_title, items: Vec::new() }
}

fn build_item<'a, N: Node<'a>, L: NutritionLookup + ?Sized>(
    row: N,
    lookup: &mut L,
) -> Result<Option<Item>, ScrapeError> {
    let cells = row.find_all(|n| n.is_tag("td") && n.nearest("tr").is_some_and(|r| r.same_node(&row)));
    let [action, name_cell, rest @ ..] = cells.as_slice() else {
        return Ok(None);
    };

    let Some(name) = item_name(*name_cell) else {
        return Ok(None);
    };
    let detail_id = detail_id(*action, *name_cell);

    let nutrition = match detail_id {
        Some(id) => Some(lookup.nutrition(id)?),
        None => None,
    };

    Ok(Some(Item {
        detail_id,
        name,
        description: description(*name_cell),
        allergens: allergens(*name_cell),
        serving_display: rest.first().and_then(|c| non_empty(c.text_content())),
        serving_choices: parse_serving_choices(rest.get(1).copied()),
        nutrition,
    }))
}

/// `data-detailoid` in the action cell, else the digits in the id of the
/// first anchor in the name cell whose id carries any.
fn detail_id<'a, N: Node<'a>>(action: N, name_cell: N) -> Option<i64> {
    let from_button = action
        .find_first(|n| n.has_attr(DETAIL_ATTR))
        .and_then(|b| b.get_attr(DETAIL_ATTR))
        .and_then(|v| v.trim().parse().ok());
    if from_button.is_some() {
        return from_button;
    }
    let anchor = name_cell.find_first(|n| n.is_tag("a") && n.get_attr("id").is_some_and(|id| DIGITS.is_match(id)))?;
    DIGITS.find(anchor.get_attr("id")?)?.as_str().parse().ok()
}

/// Anchor children minus the allergen icon spans; falls back to the anchor
/// text, then to the whole cell.
fn item_name<'a, N: Node<'a>>(cell: N) -> Option<String> {
    let Some(anchor) = cell.find_first(|n| n.is_tag("a") && n.has_class(ITEM_ANCHOR)) else {
        return non_empty(cell.text_content());
    };
    let parts: Vec<String> = anchor
        .child_nodes()
        .into_iter()
        .filter_map(|child| match child {
            Child::Text(t) => Some(t.trim().to_string()),
            Child::Element(e) if e.is_tag("span") => None,
            Child::Element(e) => Some(e.text_content()),
        })
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        non_empty(anchor.text_content())
    } else {
        Some(parts.join(" "))
    }
}

fn description<'a, N: Node<'a>>(cell: N) -> Option<String> {
    cell.find_first(|n| n.is_tag("div") && n.get_attr("class").is_some_and(|c| DESCRIPTION_CLASS.is_match(c)))
        .or_else(|| cell.find_first(|n| n.is_tag("small")))
        .and_then(|d| non_empty(d.text_content()))
}

fn allergens<'a, N: Node<'a>>(cell: N) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for img in cell.find_all(|n| n.is_tag("img")) {
        let label = img
            .get_attr("title")
            .filter(|t| !t.is_empty())
            .or_else(|| img.get_attr("alt"))
            .unwrap_or("")
            .trim();
        if !label.is_empty() && !out.iter().any(|l| l == label) {
            out.push(s!(label));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::synthetic::{el, text, Shape, Tree};

    /// Hands out a fresh label per call and records the ids asked for.
    #[derive(Default)]
    struct Recorder {
        asked: Vec<i64>,
        fail_on: Option<i64>,
    }

    impl NutritionLookup for Recorder {
        fn nutrition(&mut self, detail_id: i64) -> Result<Arc<NutritionLabel>, ScrapeError> {
            self.asked.push(detail_id);
            if self.fail_on == Some(detail_id) {
                return Err(ScrapeError::Usage(format!("label {detail_id} unavailable")));
            }
            Ok(Arc::new(NutritionLabel { calories: Some(detail_id), ..Default::default() }))
        }
    }

    fn group(onclick: &'static str, title: &'static str) -> Shape {
        el("tr", &[("class", "cbo_nn_itemGroupRow"), ("onclick", onclick)], vec![
            el("td", &[], vec![text(title)]),
        ])
    }

    fn item(cat: &'static str, detail: &'static str, name: &'static str) -> Shape {
        el("tr", &[("data-categoryid", cat)], vec![
            el("td", &[], vec![el("input", &[("data-detailoid", detail)], vec![])]),
            el("td", &[], vec![el("a", &[("class", "cbo_nn_itemHover")], vec![text(name)])]),
            el("td", &[], vec![text("1 each")]),
        ])
    }

    fn menu(rows: Vec<Shape>) -> Shape {
        let mut kids = vec![el("tr", &[], vec![el("th", &[], vec![text("Item Name")])])];
        kids.extend(rows);
        el("table", &[], kids)
    }

    /// Panel markup always arrives as a fragment around the menu tables.
    fn panel(tables: Vec<Shape>) -> Shape {
        el("div", &[], tables)
    }

    #[test]
    fn categories_items_and_lookup_order() {
        let tree = Tree::build(panel(vec![menu(vec![
            group("toggleCourseItems(this, 10)", "Entrees (Choose 1)"),
            item("10", "501", "Dal"),
            group("toggleCourseItems(this, 11)", "Sides"),
            item("11", "502", "Rice"),
            item("10", "503", "Paneer"),
            group("javascript:void(0)", "Empty Heading"),
        ])]));
        let mut lookup = Recorder::default();
        let cats = parse_panel_in(tree.root(), &mut lookup).unwrap();

        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].category_id, Some(10));
        assert_eq!(cats[0].title, "Entrees");
        assert_eq!(cats[0].selection_guidance.as_deref(), Some("Choose 1"));
        assert_eq!(cats[0].raw_title, "Entrees (Choose 1)");
        let names: Vec<&str> = cats[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Dal", "Paneer"]);
        assert_eq!(cats[1].items[0].serving_display.as_deref(), Some("1 each"));
        assert_eq!(cats[1].items[0].nutrition.as_ref().unwrap().calories, Some(502));
        assert_eq!(lookup.asked, vec![501, 502, 503]);
    }

    #[test]
    fn orphans_attach_to_last_category_and_early_rows_drop() {
        let tree = Tree::build(panel(vec![menu(vec![
            item("99", "700", "Too Early"),
            group("toggleCourseItems(this, 5)", "Salads"),
            item("5", "702", "Caesar"),
            group("", "Soups"),
            item("42", "701", "Minestrone"),
        ])]));
        let mut lookup = Recorder::default();
        let cats = parse_panel_in(tree.root(), &mut lookup).unwrap();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].items.len(), 1);
        assert_eq!(cats[1].category_id, None);
        assert_eq!(cats[1].title, "Soups");
        let soups: Vec<&str> = cats[1].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(soups, vec!["Minestrone"]);
        assert_eq!(lookup.asked, vec![702, 701]);
    }

    #[test]
    fn nested_table_rows_are_ignored() {
        let tree = Tree::build(panel(vec![menu(vec![
            group("toggleCourseItems(this,1)", "Grill"),
            el("tr", &[("data-categoryid", "1")], vec![
                el("td", &[], vec![]),
                el("td", &[], vec![
                    el("a", &[("class", "cbo_nn_itemHover"), ("id", "showNutrition_777")], vec![
                        text("Burger"),
                        el("span", &[], vec![el("img", &[("title", "Contains Wheat")], vec![])]),
                    ]),
                    el("table", &[], vec![item("1", "888", "Nested Ghost")]),
                ]),
            ]),
        ])]));
        let mut lookup = Recorder::default();
        let cats = parse_panel_in(tree.root(), &mut lookup).unwrap();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].items.len(), 1);
        let burger = &cats[0].items[0];
        assert_eq!(burger.name, "Burger");
        assert_eq!(burger.detail_id, Some(777));
        assert_eq!(burger.allergens, vec![s!("Contains Wheat")]);
        assert_eq!(lookup.asked, vec![777]);
    }

    #[test]
    fn tables_without_marker_are_skipped() {
        let tree = Tree::build(panel(vec![
            el("table", &[], vec![
                group("toggleCourseItems(this, 2)", "Hidden"),
                item("2", "1", "Nope"),
            ]),
            menu(vec![
                group("toggleCourseItems(this, 6)", "Shown"),
                item("6", "2", "Yes"),
            ]),
        ]));
        let mut lookup = Recorder::default();
        let cats = parse_panel_in(tree.root(), &mut lookup).unwrap();
        let titles: Vec<&str> = cats.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Shown"]);
        assert_eq!(lookup.asked, vec![2]);
    }

    #[test]
    fn short_rows_and_missing_names_yield_nothing() {
        let tree = Tree::build(panel(vec![menu(vec![
            group("toggleCourseItems(this, 3)", "Bakery"),
            // one cell only
            el("tr", &[("data-categoryid", "3")], vec![
                el("td", &[], vec![el("input", &[("data-detailoid", "31")], vec![]), text("lonely")]),
            ]),
            // blank name
            el("tr", &[("data-categoryid", "3")], vec![
                el("td", &[], vec![el("input", &[("data-detailoid", "32")], vec![])]),
                el("td", &[], vec![text("  ")]),
            ]),
            item("3", "33", "Bagel"),
        ])]));
        let mut lookup = Recorder::default();
        let cats = parse_panel_in(tree.root(), &mut lookup).unwrap();
        assert_eq!(cats.len(), 1);
        let names: Vec<&str> = cats[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Bagel"]);
        assert_eq!(lookup.asked, vec![33]);
    }

    #[test]
    fn lookup_failure_propagates() {
        let tree = Tree::build(panel(vec![menu(vec![
            group("toggleCourseItems(this, 4)", "Deli"),
            item("4", "12", "Club"),
            item("4", "13", "Reuben"),
        ])]));
        let mut lookup = Recorder { fail_on: Some(13), ..Default::default() };
        let err = parse_panel_in(tree.root(), &mut lookup).unwrap_err();
        assert!(err.to_string().contains("label 13 unavailable"));
        assert_eq!(lookup.asked, vec![12, 13]);
    }

    #[test]
    fn envelope_decoding() {
        let payload = r#"{"success":true,"panels":[
            {"id":"courseList","html":"x"},
            {"id":"itemPanel","html":"&lt;table&gt;Fish &amp; Chips&lt;/table&gt;"}]}"#;
        assert_eq!(item_panel_html(payload).unwrap(), "<table>Fish & Chips</table>");
        assert_eq!(item_panel_html(r#"{"panels":[]}"#).unwrap(), "");
        assert_eq!(item_panel_html("{}").unwrap(), "");
        assert!(matches!(item_panel_html("<html>"), Err(ScrapeError::Payload(_))));
    }
}
