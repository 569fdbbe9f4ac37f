// tests/catalog_run.rs
//
// Full run against an in-memory remote: discovery, per-unit failure
// containment, label caching, then JSON + CSV export.
//
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use nn_scrape::config::options::{ExportOptions, ScrapeOptions, UnitSelector};
use nn_scrape::csv::{flatten_items, to_csv_string, FLAT_HEADERS};
use nn_scrape::data::{Unit, UnitReport};
use nn_scrape::file::export_catalog;
use nn_scrape::progress::Progress;
use nn_scrape::remote::Remote;
use nn_scrape::scrape::collect_catalog;
use nn_scrape::ScrapeError;

const HOMEPAGE: &str = include_str!("fixtures/homepage.html");
const PANEL: &str = include_str!("fixtures/panel.html");
const LABEL: &str = include_str!("fixtures/label.html");

/// Serves fixtures. Unit 21 always fails; unit 40 has an empty panel.
#[derive(Default)]
struct FixtureRemote {
    homepage_down: bool,
    label_calls: RefCell<Vec<i64>>,
}

impl Remote for FixtureRemote {
    fn homepage(&self) -> Result<String, ScrapeError> {
        if self.homepage_down {
            return Err(ScrapeError::Usage("homepage unreachable".into()));
        }
        Ok(HOMEPAGE.to_string())
    }
    fn unit_panel(&self, unit_id: i64) -> Result<String, ScrapeError> {
        match unit_id {
            12 => Ok(PANEL.to_string()),
            21 => Err(ScrapeError::Usage("POST /Unit failed after 3 attempt(s)".into())),
            _ => Ok(String::new()),
        }
    }
    fn nutrition_label(&self, detail_id: i64) -> Result<String, ScrapeError> {
        self.label_calls.borrow_mut().push(detail_id);
        Ok(LABEL.to_string())
    }
    fn source(&self) -> &str {
        "https://example.test/nn"
    }
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.events.push(format!("begin {total}")); }
    fn unit_done(&mut self, unit: &Unit, c: usize, i: usize) { self.events.push(format!("done {} {c} {i}", unit.id)); }
    fn unit_failed(&mut self, unit: &Unit, _e: &str) { self.events.push(format!("failed {}", unit.id)); }
    fn finish(&mut self) { self.events.push("finish".into()); }
}

fn quick_opts() -> ScrapeOptions {
    ScrapeOptions { label_delay: Duration::ZERO, ..ScrapeOptions::default() }
}

#[test]
fn failing_unit_is_contained() {
    let remote = FixtureRemote::default();
    let mut rec = Recorder::default();
    let catalog = collect_catalog(&remote, &quick_opts(), Some(&mut rec)).unwrap();

    assert_eq!(catalog.source, "https://example.test/nn");
    assert_eq!(catalog.units_total, 3);
    assert_eq!(catalog.units_skipped, vec!["Trinity Café".to_string(), "Marketplace".to_string()]);
    assert_eq!(catalog.items_total, 4);

    let mut sorted = catalog.excluded_names.clone();
    sorted.sort();
    assert_eq!(catalog.excluded_names, sorted);

    assert_eq!(catalog.units.len(), 3);
    match &catalog.units[0] {
        UnitReport::Scraped { unit_id, category_count, item_count, .. } => {
            assert_eq!((*unit_id, *category_count, *item_count), (12, 2, 4));
        }
        other => panic!("unit 12 should succeed: {other:?}"),
    }
    match &catalog.units[1] {
        UnitReport::Failed { unit_id, error, categories, .. } => {
            assert_eq!(*unit_id, 21);
            assert!(!error.is_empty());
            assert!(categories.is_empty());
        }
        other => panic!("unit 21 should fail: {other:?}"),
    }
    assert_eq!(catalog.units[2].item_count(), 0);
    assert!(catalog.units[2].error().is_none());

    // 50001 appears twice in the panel but is fetched once
    assert_eq!(*remote.label_calls.borrow(), vec![50001, 50002]);

    // Items sharing a detail id share the parsed label
    let cats = catalog.units[0].categories();
    let a = cats[0].items[0].nutrition.as_ref().unwrap();
    let b = cats[1].items[0].nutrition.as_ref().unwrap();
    assert!(std::sync::Arc::ptr_eq(a, b));

    assert_eq!(rec.events, vec!["begin 3", "done 12 2 4", "failed 21", "done 40 0 0", "finish"]);
}

#[test]
fn selector_limits_units() {
    let remote = FixtureRemote::default();
    let opts = ScrapeOptions { units: UnitSelector::Ids(vec![40, 14]), ..quick_opts() };
    let catalog = collect_catalog(&remote, &opts, None).unwrap();
    // 14 is excluded by name, so only 40 remains
    let ids: Vec<i64> = catalog.units.iter().map(|u| u.unit_id()).collect();
    assert_eq!(ids, vec![40]);
    assert_eq!(catalog.units_total, 1);
    assert!(remote.label_calls.borrow().is_empty());
}

#[test]
fn homepage_failure_aborts() {
    let remote = FixtureRemote { homepage_down: true, ..Default::default() };
    assert!(collect_catalog(&remote, &quick_opts(), None).is_err());
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nn_scrape_{tag}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn export_writes_json_and_csv() {
    let remote = FixtureRemote::default();
    let catalog = collect_catalog(&remote, &quick_opts(), None).unwrap();

    let dir = temp_dir("export");
    let export = ExportOptions {
        json_path: dir.join("nested/menu.json"),
        csv_path: Some(dir.join("menu.csv")),
        pretty: true,
    };
    let written = export_catalog(&export, &catalog).unwrap();
    assert_eq!(written, vec![export.json_path.clone(), dir.join("menu.csv")]);

    let json_text = fs::read_to_string(&export.json_path).unwrap();
    assert!(json_text.contains("Trinity Café"), "non-ASCII must not be escaped");
    let doc: serde_json::Value = serde_json::from_str(&json_text).unwrap();
    assert_eq!(doc["units_total"], 3);
    assert_eq!(doc["items_total"], 4);
    assert!(doc["generated_at"].as_str().unwrap().ends_with('Z'));

    let rice = &doc["units"][0]["categories"][1]["items"][1];
    assert_eq!(rice["name"], "Steamed Rice");
    for pruned in ["detail_id", "description", "allergens", "serving_choices", "nutrition"] {
        assert!(rice.get(pruned).is_none(), "{pruned} should be omitted");
    }
    let failed = &doc["units"][1];
    assert!(failed.get("category_count").is_none());
    assert_eq!(failed["categories"], serde_json::json!([]));

    let csv_text = fs::read_to_string(dir.join("menu.csv")).unwrap();
    let mut lines = csv_text.lines();
    assert_eq!(lines.next().unwrap(), FLAT_HEADERS.join(","));
    assert!(lines.next().unwrap().starts_with("12,The Loop Pizza Grill,1001,Entrees,Choose 1,50001,Black Bean Burger,"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn flat_rows_shape() {
    let remote = FixtureRemote::default();
    let catalog = collect_catalog(&remote, &quick_opts(), None).unwrap();
    let rows = flatten_items(&catalog.units).unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.len() == FLAT_HEADERS.len()));

    let burger = &rows[0];
    assert_eq!(burger[8], "Vegan; Wheat");
    assert_eq!(burger[11], "410");
    let choices: serde_json::Value = serde_json::from_str(&burger[10]).unwrap();
    assert_eq!(choices["type"], "select");
    let nutrients: serde_json::Value = serde_json::from_str(&burger[17]).unwrap();
    assert_eq!(nutrients[0]["key"], "total_fat");

    let rice = &rows[3];
    assert_eq!(rice[5], "");
    assert_eq!(rice[11], "");
    assert_eq!(rice[17], "");

    assert!(to_csv_string(&rows).lines().count() >= 5);
}
