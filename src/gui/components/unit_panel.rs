// src/gui/components/unit_panel.rs
//
// Renders the left unit list from the last scrape and applies the selection
// directly to `app`.

use eframe::egui::{self, Color32, RichText};
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Units");
    ui.separator();

    let Some(catalog) = &app.catalog else {
        ui.label("No data yet. Press Scrape.");
        return;
    };

    if !catalog.units_skipped.is_empty() {
        ui.label(RichText::new(format!("Skipped: {}", catalog.units_skipped.join(", "))).weak());
        ui.separator();
    }

    let mut clicked = None;
    egui::ScrollArea::vertical()
        .id_salt("units_panel_scroll")
        .show(ui, |ui| {
            let w = ui.available_width();
            ui.set_min_width(w);

            for (idx, report) in catalog.units.iter().enumerate() {
                let is_selected = app.state.gui.selected_unit == Some(idx);
                let text = match report.error() {
                    None => RichText::new(format!("{} ({})", report.name(), report.item_count())),
                    Some(_) => RichText::new(format!("{} (failed)", report.name())).color(Color32::LIGHT_RED),
                };
                let resp = ui.selectable_label(is_selected, text);
                let resp = match report.error() {
                    Some(e) => resp.on_hover_text(e),
                    None => resp,
                };
                if resp.clicked() {
                    clicked = Some(idx);
                }
            }
        });

    if let Some(idx) = clicked {
        logd!("UI: Unit selected → {}", idx);
        app.state.gui.select_unit(idx);
    }
}
