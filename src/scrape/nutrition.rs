// src/scrape/nutrition.rs
//
// Run-scoped label cache: each detail id is fetched and parsed at most once.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::data::NutritionLabel;
use crate::error::ScrapeError;
use crate::remote::Remote;
use crate::specs::label::parse_label;
use crate::specs::panel::NutritionLookup;

#[derive(Debug, Default)]
pub struct NutritionCache {
    labels: HashMap<i64, Arc<NutritionLabel>>,
}

impl NutritionCache {
    pub fn get(&self, detail_id: i64) -> Option<Arc<NutritionLabel>> {
        self.labels.get(&detail_id).cloned()
    }
    pub fn insert(&mut self, detail_id: i64, label: Arc<NutritionLabel>) {
        self.labels.insert(detail_id, label);
    }
    pub fn contains(&self, detail_id: i64) -> bool { self.labels.contains_key(&detail_id) }
    pub fn len(&self) -> usize { self.labels.len() }
    pub fn is_empty(&self) -> bool { self.labels.is_empty() }
}

/// Fetches labels through a `Remote`, parsing and caching each one.
/// Sleeps `delay` after every network fetch, never after a cache hit.
pub struct NutritionFetcher<'r, R: Remote + ?Sized> {
    remote: &'r R,
    cache: NutritionCache,
    delay: Duration,
    network_fetches: usize,
}

impl<'r, R: Remote + ?Sized> NutritionFetcher<'r, R> {
    pub fn new(remote: &'r R, delay: Duration) -> Self {
        Self { remote, cache: NutritionCache::default(), delay, network_fetches: 0 }
    }

    pub fn fetch(&mut self, detail_id: i64) -> Result<Arc<NutritionLabel>, ScrapeError> {
        if let Some(hit) = self.cache.get(detail_id) {
            return Ok(hit);
        }
        let markup = self.remote.nutrition_label(detail_id)?;
        self.network_fetches += 1;
        let label = Arc::new(parse_label(&markup));
        self.cache.insert(detail_id, Arc::clone(&label));
        logd!("label {detail_id} fetched ({} cached)", self.cache.len());
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(label)
    }

    pub fn cache(&self) -> &NutritionCache { &self.cache }

    /// Labels pulled from the network so far.
    pub fn network_fetches(&self) -> usize { self.network_fetches }
}

impl<R: Remote + ?Sized> NutritionLookup for NutritionFetcher<'_, R> {
    fn nutrition(&mut self, detail_id: i64) -> Result<Arc<NutritionLabel>, ScrapeError> {
        self.fetch(detail_id)
    }
}
