// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific extraction for the NetNutrition site. Each spec focuses on a
//! single page or fragment and encodes *where the ground truth lives in the
//! markup* and *how to extract it robustly*.
//!
//! ## What lives here
//! - **Pure parsing** of the homepage (`units`), the item panel (`panel`), the
//!   serving-size cell (`servings`) and the nutrition label (`label`).
//! - **Tolerant extraction** over the `core::html::Node` trait: anything
//!   missing degrades to `None` or an empty list, never an error.
//! - **Light shaping** of results into the `data` entities.
//!
//! ## What does **not** live here
//! - **Networking and caching**: labels arrive through the `panel::NutritionLookup`
//!   seam, implemented by `scrape::NutritionFetcher`.
//! - **Run orchestration, export, GUI**: `scrape::collect_catalog`, `file`, `gui`.
//!
//! ## Typical call chain
//! ```text
//! GUI / CLI → scrape::collect_catalog → specs::units::discover
//!                                   ↘  specs::panel::parse_panel
//!                                         ↘ NutritionLookup → specs::label::parse_label
//! ```
//!
//! ## Conventions & invariants
//! - Output order is document order, always.
//! - Class and attribute names are matched exactly; text is compared after
//!   whitespace normalization.
//! - Specs are testable **offline** against captured fixtures and hand-built trees.
pub mod label;
pub mod panel;
pub mod servings;
pub mod units;
