// src/gui/components/nutrition_panel.rs

use eframe::egui;

use crate::data::{Item, ServingChoice};
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Nutrition");
    ui.separator();

    let Some(item) = app.selected_item() else {
        ui.label("Select an item.");
        return;
    };

    egui::ScrollArea::vertical()
        .id_salt("nutrition_panel_scroll")
        .show(ui, |ui| item_details(ui, item));
}

fn item_details(ui: &mut egui::Ui, item: &Item) {
    ui.strong(&item.name);
    if let Some(d) = &item.description {
        ui.label(d);
    }
    if let Some(id) = item.detail_id {
        ui.small(format!("detail id {id}"));
    }
    if let Some(ServingChoice::Selectable { options }) = &item.serving_choices {
        egui::CollapsingHeader::new("Serving options").show(ui, |ui| {
            for o in options {
                let servings = o.servings.map(|s| format!(" ({s} servings)")).unwrap_or_default();
                ui.label(format!("{}{servings}", o.label));
            }
        });
    }

    let Some(label) = &item.nutrition else {
        ui.separator();
        ui.label("No nutrition label.");
        return;
    };

    ui.separator();
    egui::Grid::new("label_header").num_columns(2).show(ui, |ui| {
        let field = |ui: &mut egui::Ui, name: &str, value: Option<&str>| {
            ui.label(name);
            ui.label(value.unwrap_or("–"));
            ui.end_row();
        };
        field(ui, "Label", label.label_name.as_deref());
        field(ui, "Serving size", label.serving_size.as_deref());
        field(ui, "Servings", label.servings_per_container.as_deref());
        field(ui, "Calories", label.calories_raw.as_deref());
    });

    ui.separator();
    egui::Grid::new("nutrients").striped(true).num_columns(3).show(ui, |ui| {
        for row in &label.nutrients {
            ui.label(&row.label);
            ui.label(row.amount.as_deref().unwrap_or(""));
            ui.label(row.daily_value_raw.as_deref().unwrap_or(""));
            ui.end_row();
        }
    });

    if let Some(ing) = &label.ingredients {
        egui::CollapsingHeader::new("Ingredients")
            .default_open(false)
            .show(ui, |ui| match &ing.list {
                Some(list) => {
                    for i in list {
                        ui.label(format!("• {i}"));
                    }
                }
                None => {
                    ui.label(&ing.raw);
                }
            });
    }
}
