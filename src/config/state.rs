// src/config/state.rs
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Index into the catalog's unit reports
    pub selected_unit: Option<usize>,
    /// (category index, item index) within the selected unit
    pub selected_item: Option<(usize, usize)>,
    /// Case-insensitive substring filter on item names
    pub item_filter: String,

    pub window_w: u32,
    pub window_h: u32,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            selected_unit: None,
            selected_item: None,
            item_filter: s!(),
            window_w: 1200,
            window_h: 760,
        }
    }
}

impl GuiState {
    pub fn select_unit(&mut self, ix: usize) {
        if self.selected_unit != Some(ix) {
            self.selected_unit = Some(ix);
            self.selected_item = None;
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
