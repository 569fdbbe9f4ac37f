// src/gui/components/item_table.rs
//
// Items of the selected unit, one row each. Clicking a name selects it for
// the nutrition panel. Purely a view apart from the selection.

use eframe::egui::{self, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::data::ServingChoice;
use crate::gui::app::App;

const HEADERS: [&str; 6] = ["Category", "Item", "Serving", "Calories", "Allergens", "Description"];

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(report) = app.selected_report() else {
        ui.label("Select a unit on the left.");
        return;
    };
    if let Some(err) = report.error() {
        ui.colored_label(egui::Color32::LIGHT_RED, format!("{} failed: {err}", report.name()));
        return;
    }

    let visible = app.visible_items();
    let categories = report.categories();
    let selected = app.state.gui.selected_item;
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .column(Column::initial(140.0).resizable(true).clip(true))
        .column(Column::initial(220.0).resizable(true).clip(true))
        .column(Column::initial(110.0).resizable(true).clip(true))
        .column(Column::initial(60.0).resizable(true))
        .column(Column::initial(160.0).resizable(true).clip(true))
        .column(Column::remainder().clip(true))
        .header(24.0, |mut header| {
            for h in HEADERS {
                header.col(|ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(22.0, visible.len(), |mut row| {
                let (ci, ii) = visible[row.index()];
                let cat = &categories[ci];
                let item = &cat.items[ii];
                row.col(|ui| {
                    ui.label(RichText::new(&cat.title).weak());
                });
                row.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Truncate);
                    if ui.selectable_label(selected == Some((ci, ii)), &item.name).clicked() {
                        clicked = Some((ci, ii));
                    }
                });
                row.col(|ui| {
                    ui.label(serving_text(item.serving_display.as_deref(), item.serving_choices.as_ref()));
                });
                row.col(|ui| {
                    let kcal = item.nutrition.as_ref().and_then(|n| n.calories);
                    ui.label(kcal.map(|c| c.to_string()).unwrap_or_default());
                });
                row.col(|ui| {
                    ui.label(item.allergens.join(", "));
                });
                row.col(|ui| {
                    ui.label(item.description.as_deref().unwrap_or(""));
                });
            });
        });

    if clicked.is_some() {
        app.state.gui.selected_item = clicked;
    }
}

fn serving_text(display: Option<&str>, choices: Option<&ServingChoice>) -> String {
    match (display, choices) {
        (Some(d), _) => s!(d),
        (None, Some(ServingChoice::Static { value })) => value.clone(),
        (None, Some(ServingChoice::Selectable { options })) => {
            options.first().map(|o| o.label.clone()).unwrap_or_default()
        }
        (None, None) => s!(),
    }
}
