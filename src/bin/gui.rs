// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use nn_scrape::{config::state::GuiState, gui, log};
use eframe::egui::ViewportBuilder;

fn main() {
    log::init(log::LogTarget::File);

    let defaults = GuiState::default();
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("NetNutrition Scraper")
            .with_inner_size([defaults.window_w as f32, defaults.window_h as f32]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
