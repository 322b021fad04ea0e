use super::types::{padded_seed, CatalogFile, Classifications, SeedRecord, SeedRef};
use super::{MapType, Nightlord, NightlordChoice, PoiKind};
use crate::slots::resolve_slot;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Immutable seed catalog plus the optional CV classification overlay.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    seeds: BTreeMap<u32, SeedRef>,
    classifications: Option<Classifications>,
}

/// Counts reported by `status` and the inspector header.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub seed_count: usize,
    pub classified_seed_count: usize,
    pub by_map_type: BTreeMap<String, usize>,
    pub by_nightlord: BTreeMap<String, usize>,
}

impl CatalogStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from already-typed records. Later duplicates of a seed
    /// number replace earlier ones.
    pub fn from_records(records: impl IntoIterator<Item = SeedRecord>) -> Self {
        let seeds = records
            .into_iter()
            .map(|record| (record.seed_number, Arc::new(record)))
            .collect();
        Self {
            seeds,
            classifications: None,
        }
    }

    pub fn with_classifications(mut self, classifications: Classifications) -> Self {
        self.classifications = Some(classifications);
        self
    }

    /// Parse a catalog document. Only a document that is not JSON, or whose
    /// top level has the wrong shape, is an error; bad seed records and a
    /// bad overlay are skipped with a warning.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_slice(bytes).context("parse catalog JSON")?;
        let mut seeds = BTreeMap::new();
        for (key, value) in file.poi_database.seeds {
            match parse_seed(&key, value) {
                Ok(record) => {
                    seeds.insert(record.seed_number, Arc::new(record));
                }
                Err(err) => {
                    tracing::warn!(seed = %key, error = %format!("{err:#}"), "skipping seed record");
                }
            }
        }
        let classifications = file.classifications.and_then(parse_classifications);
        Ok(Self {
            seeds,
            classifications,
        })
    }

    /// Read and parse a catalog file.
    pub fn try_load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("read catalog {}", path.display()))?;
        Self::from_json(&bytes).with_context(|| format!("load catalog {}", path.display()))
    }

    /// Load a catalog, falling back to an empty one when it cannot be read.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(store) => {
                tracing::info!(
                    path = %path.display(),
                    seeds = store.seeds.len(),
                    classified = store.classified_seed_count(),
                    "catalog loaded"
                );
                store
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %format!("{err:#}"),
                    "catalog unavailable; continuing with an empty catalog"
                );
                Self::empty()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// Every seed, in seed number order.
    pub fn all_seeds(&self) -> Vec<SeedRef> {
        self.seeds.values().cloned().collect()
    }

    /// Seeds matching both constraints; `None` and `Unknown` match anything.
    pub fn filter_seeds(
        &self,
        nightlord: Option<NightlordChoice>,
        map_type: Option<MapType>,
    ) -> Vec<SeedRef> {
        let nightlord = nightlord.and_then(|choice| choice.effective());
        self.seeds
            .values()
            .filter(|seed| nightlord_matches(nightlord, seed.nightlord))
            .filter(|seed| map_type.is_none_or(|map| seed.map_type == map))
            .cloned()
            .collect()
    }

    pub fn seed_by_number(&self, seed_number: u32) -> Option<SeedRef> {
        self.seeds.get(&seed_number).cloned()
    }

    /// Kind of the first POI (in slot id order) within `tolerance` of
    /// `(x, y)`. The first hit wins even if a later POI is closer.
    pub fn poi_type_at_coordinate(
        &self,
        seed_number: u32,
        x: f64,
        y: f64,
        tolerance: f64,
    ) -> Option<PoiKind> {
        let seed = self.seeds.get(&seed_number)?;
        seed.pois
            .values()
            .find(|poi| poi.coordinates.distance_to(x, y) <= tolerance)
            .map(|poi| poi.kind)
    }

    pub fn has_classifications(&self) -> bool {
        self.classifications.is_some()
    }

    /// Overlay lookup: resolve `(x, y)` to a slot of `map_type`, then read
    /// that slot's CV label for the seed. `nothing` reads as no POI.
    pub fn classification_at(
        &self,
        seed_number: u32,
        map_type: MapType,
        x: f64,
        y: f64,
        tolerance: f64,
    ) -> Option<PoiKind> {
        let overlay = self.classifications.as_ref()?;
        let labels = overlay.get(&padded_seed(seed_number))?;
        let slot = resolve_slot(map_type, x, y, tolerance)?;
        labels
            .get(&format!("POI{}", slot.id))
            .and_then(|label| label.kind())
    }

    pub fn classified_seed_count(&self) -> usize {
        self.classifications.as_ref().map_or(0, |overlay| overlay.len())
    }

    pub fn summary(&self) -> CatalogSummary {
        let mut by_map_type = BTreeMap::new();
        let mut by_nightlord = BTreeMap::new();
        for seed in self.seeds.values() {
            *by_map_type
                .entry(seed.map_type.as_str().to_string())
                .or_insert(0) += 1;
            *by_nightlord
                .entry(seed.nightlord.as_str().to_string())
                .or_insert(0) += 1;
        }
        CatalogSummary {
            seed_count: self.seeds.len(),
            classified_seed_count: self.classified_seed_count(),
            by_map_type,
            by_nightlord,
        }
    }
}

fn parse_seed(key: &str, value: serde_json::Value) -> Result<SeedRecord> {
    let mut record: SeedRecord = serde_json::from_value(value).context("parse seed record")?;
    if record.seed_number == 0 {
        record.seed_number = key
            .trim()
            .parse()
            .with_context(|| format!("seed key {key:?} is not a seed number"))?;
    }
    Ok(record)
}

fn parse_classifications(value: serde_json::Value) -> Option<Classifications> {
    match serde_json::from_value(value) {
        Ok(overlay) => Some(overlay),
        Err(err) => {
            tracing::warn!(error = %err, "classification overlay unreadable; ignoring it");
            None
        }
    }
}

fn nightlord_matches(wanted: Option<Nightlord>, actual: Nightlord) -> bool {
    wanted.is_none_or(|lord| lord == actual)
}
