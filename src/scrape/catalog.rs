// src/scrape/catalog.rs
use chrono::Utc;

use crate::{
    config::options::ScrapeOptions,
    data::{Catalog, Category, Discovery, Unit, UnitReport},
    error::ScrapeError,
    progress::Progress,
    remote::Remote,
    specs::{panel::{parse_panel, NutritionLookup}, units},
};

use super::NutritionFetcher;

/// Fetch the homepage and split its units into kept and excluded ones.
pub fn discover_units<R: Remote + ?Sized>(remote: &R, opts: &ScrapeOptions) -> Result<Discovery, ScrapeError> {
    let homepage = remote.homepage()?;
    Ok(units::discover(&homepage, &opts.excluded_names))
}

/// Scrape every selected unit into a `Catalog`.
///
/// Units run one after another, sharing a single label cache. A unit that fails
/// is logged and kept in the output with its error; only a homepage failure
/// ends the run early.
pub fn collect_catalog<R: Remote + ?Sized>(
    remote: &R,
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Catalog, ScrapeError> {
    let discovery = match discover_units(remote, opts) {
        Ok(d) => d,
        Err(e) => {
            loge!("homepage fetch failed: {e}");
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!("Homepage failed: {e}"));
                p.finish();
            }
            return Err(e);
        }
    };

    let selected: Vec<Unit> = discovery
        .units
        .into_iter()
        .filter(|u| opts.units.admits(u.id))
        .collect();

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!(
            "Discovered {} units, processing {} (skipped {})",
            discovery.discovered.len(),
            selected.len(),
            discovery.skipped.len()
        ));
        p.begin(selected.len());
    }

    let mut fetcher = NutritionFetcher::new(remote, opts.label_delay);
    let mut reports = Vec::with_capacity(selected.len());
    let mut items_total = 0;

    for (i, unit) in selected.iter().enumerate() {
        if let Some(p) = progress.as_deref_mut() {
            p.unit_started(i, unit);
        }
        match scrape_unit(remote, &mut fetcher, unit) {
            Ok(categories) => {
                let report = UnitReport::scraped(unit, categories);
                items_total += report.item_count();
                if let Some(p) = progress.as_deref_mut() {
                    p.unit_done(unit, report.categories().len(), report.item_count());
                }
                reports.push(report);
            }
            Err(e) => {
                loge!("unit {} ({}) failed: {e}", unit.name, unit.id);
                let msg = e.to_string();
                if let Some(p) = progress.as_deref_mut() {
                    p.unit_failed(unit, &msg);
                }
                reports.push(UnitReport::failed(unit, msg));
            }
        }
    }

    logf!(
        "catalog done: {} units, {items_total} items, {} labels fetched",
        reports.len(),
        fetcher.network_fetches()
    );
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let mut excluded_names = opts.excluded_names.clone();
    excluded_names.sort();

    Ok(Catalog {
        source: s!(remote.source()),
        generated_at: Utc::now(),
        units_total: selected.len(),
        units_skipped: discovery.skipped,
        items_total,
        excluded_names,
        units: reports,
    })
}

/// Panel for one unit, with nutrition resolved through `lookup`.
pub fn scrape_unit<R: Remote + ?Sized, L: NutritionLookup + ?Sized>(
    remote: &R,
    lookup: &mut L,
    unit: &Unit,
) -> Result<Vec<Category>, ScrapeError> {
    logd!("fetching panel for {} ({})", unit.name, unit.id);
    let markup = remote.unit_panel(unit.id)?;
    parse_panel(&markup, lookup)
}
