// src/gui/components/action_bar.rs

use eframe::egui::{self, widgets::Spinner};
use crate::config::consts::DEFAULT_CSV_FILE;
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App, ctx: &egui::Context) {
    ui.horizontal(|ui| {
        let scrape = ui.add_enabled(!app.running, egui::Button::new("Scrape"));
        if scrape.clicked() {
            actions::scrape(app, ctx);
        }

        ui.label("JSON:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.out_path_text).desired_width(260.0),
        );
        if resp.changed() {
            app.out_path_dirty = true;
        }

        let export = &mut app.state.options.export;
        let mut csv_on = export.csv_path.is_some();
        if ui.checkbox(&mut csv_on, "CSV").changed() {
            if csv_on {
                // next to the JSON file
                let beside = export.json_path.with_file_name(DEFAULT_CSV_FILE);
                export.csv_path = Some(beside);
            } else {
                export.csv_path = None;
            }
            logf!("UI: CSV export → {}", csv_on);
        }

        let has_data = app.catalog.is_some();
        if ui.add_enabled(has_data && !app.running, egui::Button::new("Export")).clicked() {
            actions::export(app);
        }
        if ui.add_enabled(has_data, egui::Button::new("Copy")).clicked() {
            actions::copy(app, ctx);
        }
    });

    ui.horizontal(|ui| {
        if app.running {
            ui.add(Spinner::new());
        }
        ui.label(app.status_text());
    });

    ui.horizontal(|ui| {
        ui.label("Filter:");
        ui.add(egui::TextEdit::singleline(&mut app.state.gui.item_filter).desired_width(200.0));
        if let Some(c) = &app.catalog {
            ui.label(format!(
                "{} units, {} items, generated {}",
                c.units_total,
                c.items_total,
                c.generated_at.format("%Y-%m-%d %H:%M UTC")
            ));
        }
    });
}
