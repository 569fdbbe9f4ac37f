// src/progress.rs
use crate::data::Unit;

/// Lightweight progress reporting used by the catalog run.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called once discovery is done, with the number of units to scrape.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A unit is about to be fetched. `index` is zero-based.
    fn unit_started(&mut self, _index: usize, _unit: &Unit) {}

    /// A unit's panel was parsed.
    fn unit_done(&mut self, _unit: &Unit, _categories: usize, _items: usize) {}

    /// A unit failed; the run carries on with the next one.
    fn unit_failed(&mut self, _unit: &Unit, _error: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

