// src/remote.rs
//
// The three site calls the scrape needs. `NetNutrition` is the live client;
// tests substitute their own `Remote` serving fixtures.

use crate::config::consts::{ITEM_PANEL_PATH, LABEL_PATH};
use crate::config::options::ScrapeOptions;
use crate::core::net::{Method, Transport};
use crate::error::ScrapeError;
use crate::specs::panel::item_panel_html;

pub trait Remote {
    /// Homepage markup, which carries the unit list.
    fn homepage(&self) -> Result<String, ScrapeError>;

    /// Item panel markup for one unit, already unwrapped from its JSON envelope.
    fn unit_panel(&self, unit_id: i64) -> Result<String, ScrapeError>;

    /// Nutrition label fragment for one item.
    fn nutrition_label(&self, detail_id: i64) -> Result<String, ScrapeError>;

    /// Recorded as `source` in the output document.
    fn source(&self) -> &str;
}

pub struct NetNutrition {
    base_url: String,
    transport: Transport,
}

impl NetNutrition {
    pub fn new(opts: &ScrapeOptions) -> Result<Self, ScrapeError> {
        let base_url = s!(opts.base_url.trim_end_matches('/'));
        let transport = Transport::new(&base_url, opts.retry_policy())?;
        Ok(Self { base_url, transport })
    }
}

impl Remote for NetNutrition {
    fn homepage(&self) -> Result<String, ScrapeError> {
        Ok(self.transport.fetch(Method::Get, &self.base_url, &[])?)
    }

    fn unit_panel(&self, unit_id: i64) -> Result<String, ScrapeError> {
        let url = join!(&self.base_url, ITEM_PANEL_PATH);
        let payload = self.transport.fetch(Method::Post, &url, &[("unitOid", unit_id.to_string())])?;
        item_panel_html(&payload)
    }

    fn nutrition_label(&self, detail_id: i64) -> Result<String, ScrapeError> {
        let url = join!(&self.base_url, LABEL_PATH);
        Ok(self.transport.fetch(Method::Post, &url, &[("detailOid", detail_id.to_string())])?)
    }

    fn source(&self) -> &str {
        &self.base_url
    }
}
