// src/gui/actions/copy.rs
use eframe::egui;

use crate::{csv, gui::app::App};

/// Copy the selected unit's visible items, as flat CSV rows, to the clipboard.
pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let Some(report) = app.selected_report() else {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but no unit is selected");
        return;
    };

    let visible = app.visible_items();
    if visible.is_empty() {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but there's nothing to copy");
        return;
    }

    let rows = match csv::flatten_items(std::slice::from_ref(report)) {
        Ok(rows) => rows,
        Err(e) => {
            loge!("Copy: Error: {}", e);
            app.status(format!("Copy failed: {e}"));
            return;
        }
    };

    // flatten_items walks items in the same order visible_items does
    let mut all = Vec::with_capacity(rows.len());
    for (ci, cat) in report.categories().iter().enumerate() {
        for ii in 0..cat.items.len() {
            all.push((ci, ii));
        }
    }
    let picked: Vec<Vec<String>> = all
        .iter()
        .zip(rows)
        .filter(|(pos, _)| visible.contains(pos))
        .map(|(_, row)| row)
        .collect();

    logf!("Copy: unit={}, rows={}", report.name(), picked.len());
    ui_ctx.copy_text(csv::to_csv_string(&picked));
    app.status("Copied to clipboard");
}
