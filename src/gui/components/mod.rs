// src/gui/components/mod.rs
pub mod action_bar;
pub mod item_table;
pub mod nutrition_panel;
pub mod unit_panel;
