// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::data::Unit;
use crate::progress::Progress;

/// Writes a one-line status for the UI thread to show.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    done: usize,
    failed: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, done: 0, failed: 0, total: 0 }
    }
    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        self.set_status(msg);
    }
    fn unit_started(&mut self, index: usize, unit: &Unit) {
        self.set_status(format!("[{}/{}] Fetching {}…", index + 1, self.total, unit.name));
    }
    fn unit_done(&mut self, unit: &Unit, categories: usize, items: usize) {
        self.done += 1;
        self.set_status(format!("{}: {items} items across {categories} categories", unit.name));
    }
    fn unit_failed(&mut self, unit: &Unit, error: &str) {
        self.done += 1;
        self.failed += 1;
        self.set_status(format!("{} failed: {error}", unit.name));
    }
    fn finish(&mut self) {
        if self.total == 0 {
            self.set_status("Fetch complete"); // no counts if we never began
        } else if self.failed == 0 {
            self.set_status(format!("Fetch complete ({}/{})", self.done, self.total));
        } else {
            self.set_status(format!(
                "Fetch complete ({}/{}, {} failed)",
                self.done, self.total, self.failed
            ));
        }
    }
}
