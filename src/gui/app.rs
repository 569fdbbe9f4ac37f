// src/gui/app.rs
use std::{
    error::Error,
    sync::{mpsc::{Receiver, TryRecvError}, Arc, Mutex},
    time::Duration,
};

use eframe::egui;

use crate::{
    config::state::AppState,
    data::{Catalog, Item, UnitReport},
};

use super::components;

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "NetNutrition Scraper",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

/// What the scrape worker hands back.
pub type ScrapeOutcome = Result<Catalog, String>;

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // last finished scrape, if any
    pub catalog: Option<Catalog>,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    // status/progress (worker writes here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
    pub worker: Option<Receiver<ScrapeOutcome>>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let out_path_text = state.options.export.json_path.to_string_lossy().into_owned();
        logf!("Init: base_url={}", state.options.scrape.base_url);
        Self {
            state,
            catalog: None,
            out_path_text,
            out_path_dirty: false,
            status: Arc::new(Mutex::new(s!("Idle"))),
            running: false,
            worker: None,
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn selected_report(&self) -> Option<&UnitReport> {
        let ix = self.state.gui.selected_unit?;
        self.catalog.as_ref()?.units.get(ix)
    }

    pub fn selected_item(&self) -> Option<&Item> {
        let (ci, ii) = self.state.gui.selected_item?;
        self.selected_report()?.categories().get(ci)?.items.get(ii)
    }

    /// (category index, item index) of every item in the selected unit that
    /// passes the name filter, in menu order.
    pub fn visible_items(&self) -> Vec<(usize, usize)> {
        let Some(report) = self.selected_report() else { return Vec::new() };
        let needle = self.state.gui.item_filter.trim().to_lowercase();
        let mut out = Vec::new();
        for (ci, cat) in report.categories().iter().enumerate() {
            for (ii, item) in cat.items.iter().enumerate() {
                if needle.is_empty() || item.name.to_lowercase().contains(&needle) {
                    out.push((ci, ii));
                }
            }
        }
        out
    }

    /// Pick up a finished scrape from the worker, if there is one.
    fn poll_worker(&mut self) {
        let Some(rx) = &self.worker else { return };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(s!("scrape worker stopped unexpectedly")),
        };
        self.worker = None;
        self.running = false;
        match outcome {
            Ok(catalog) => {
                logf!("Scrape: OK units={} items={}", catalog.units.len(), catalog.items_total);
                self.state.gui.selected_unit = None;
                self.state.gui.selected_item = None;
                if !catalog.units.is_empty() {
                    self.state.gui.select_unit(0);
                }
                self.catalog = Some(catalog);
            }
            Err(e) => {
                loge!("Scrape: Error: {e}");
                self.status(format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();
        if self.running {
            // status text changes without input events
            ctx.request_repaint_after(Duration::from_millis(200));
        }

        egui::SidePanel::left("units")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                components::unit_panel::draw(ui, self);
            });

        egui::SidePanel::right("nutrition")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                components::nutrition_panel::draw(ui, self);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::action_bar::draw(ui, self, ctx);
            ui.separator();
            components::item_table::draw(ui, self);
        });
    }
}
