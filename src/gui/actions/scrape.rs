// src/gui/actions/scrape.rs
use std::{sync::mpsc, thread};

use eframe::egui;

use crate::{
    gui::app::{App, ScrapeOutcome},
    gui::progress::GuiProgress,
    remote::NetNutrition,
    scrape::collect_catalog,
};

/// Start a scrape on a background thread. The finished catalog comes back
/// over a channel and is picked up by `App::update`.
pub fn scrape(app: &mut App, ctx: &egui::Context) {
    if app.running {
        logd!("Scrape: Clicked while a scrape is running");
        return;
    }

    let opts = app.state.options.scrape.clone();
    logf!("Scrape: Begin units={:?} base_url={}", opts.units, opts.base_url);

    let (tx, rx) = mpsc::channel::<ScrapeOutcome>();
    let status = app.status.clone();
    let repaint = ctx.clone();

    app.running = true;
    app.worker = Some(rx);
    app.status("Fetching unit list…");

    thread::spawn(move || {
        let mut prog = GuiProgress::new(status);
        // → This is where the scrape happens ←
        let outcome = NetNutrition::new(&opts)
            .and_then(|remote| collect_catalog(&remote, &opts, Some(&mut prog)))
            .map_err(|e| e.to_string());
        let _ = tx.send(outcome);
        repaint.request_repaint();
    });
}
