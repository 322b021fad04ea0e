//! Constraint filter: which catalog seeds agree with the current observations.
//!
//! Evaluation is a pure function of the catalog, the observation state and the
//! ground-truth source. Precedence:
//!
//! 1. nothing chosen: every seed, assertions ignored;
//! 2. catalog query by effective nightlord (`Unknown` is a wildcard) and map;
//! 3. without a map type, or with POI filter mode off, stop there;
//! 4. otherwise keep seeds that satisfy the slot predicate on every slot of the
//!    active map type.
use crate::catalog::{CatalogStore, MapType, PoiKind, SeedRecord, SeedRef, MATCH_TOLERANCE};
use crate::observation::{Assertion, ObservationState};
use crate::slots::{slots_for, SlotDefinition};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where per-slot ground truth comes from.
pub trait GroundTruth {
    /// Kind of POI the seed has at `slot`, or `None` for nothing.
    fn kind_at(
        &self,
        seed: &SeedRecord,
        map_type: MapType,
        slot: &SlotDefinition,
    ) -> Option<PoiKind>;
}

/// Ground truth read from the seed's own POI records.
pub struct PoiDatabaseTruth<'a> {
    catalog: &'a CatalogStore,
}

impl<'a> PoiDatabaseTruth<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        Self { catalog }
    }
}

impl GroundTruth for PoiDatabaseTruth<'_> {
    fn kind_at(
        &self,
        seed: &SeedRecord,
        _map_type: MapType,
        slot: &SlotDefinition,
    ) -> Option<PoiKind> {
        self.catalog
            .poi_type_at_coordinate(seed.seed_number, slot.x, slot.y, MATCH_TOLERANCE)
    }
}

/// Ground truth read from the CV classification overlay.
pub struct ClassificationTruth<'a> {
    catalog: &'a CatalogStore,
}

impl<'a> ClassificationTruth<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        Self { catalog }
    }
}

impl GroundTruth for ClassificationTruth<'_> {
    fn kind_at(
        &self,
        seed: &SeedRecord,
        map_type: MapType,
        slot: &SlotDefinition,
    ) -> Option<PoiKind> {
        self.catalog
            .classification_at(seed.seed_number, map_type, slot.x, slot.y, MATCH_TOLERANCE)
    }
}

/// Configured choice of ground truth.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroundTruthSource {
    #[default]
    PoiDatabase,
    Classifications,
}

impl GroundTruthSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroundTruthSource::PoiDatabase => "poi_database",
            GroundTruthSource::Classifications => "classifications",
        }
    }

    /// The source actually usable with this catalog. Requesting the overlay
    /// from a catalog without one falls back to the POI database.
    pub fn resolve(self, catalog: &CatalogStore) -> Self {
        if self == GroundTruthSource::Classifications && !catalog.has_classifications() {
            tracing::warn!("catalog has no classification overlay; using poi database");
            return GroundTruthSource::PoiDatabase;
        }
        self
    }
}

impl fmt::Display for GroundTruthSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which precedence branch produced a result.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchScope {
    /// No nightlord or map chosen; the whole catalog.
    Unconstrained,
    /// Nightlord and/or map filter only.
    CatalogOnly,
    /// Map chosen and the slot predicate applied.
    PoiFiltered,
}

impl MatchScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchScope::Unconstrained => "unconstrained",
            MatchScope::CatalogOnly => "catalog_only",
            MatchScope::PoiFiltered => "poi_filtered",
        }
    }
}

/// Seeds consistent with the observations, ascending by seed number.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    seeds: Vec<SeedRef>,
    scope: MatchScope,
}

impl MatchResult {
    fn new(mut seeds: Vec<SeedRef>, scope: MatchScope) -> Self {
        seeds.sort_by_key(|seed| seed.seed_number);
        Self { seeds, scope }
    }

    pub fn seeds(&self) -> &[SeedRef] {
        &self.seeds
    }

    pub fn scope(&self) -> MatchScope {
        self.scope
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// The only remaining seed, when exactly one is left.
    pub fn single(&self) -> Option<&SeedRef> {
        match self.seeds.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    pub fn get(&self, index: usize) -> Option<&SeedRef> {
        self.seeds.get(index)
    }

    pub fn position_of(&self, seed_number: u32) -> Option<usize> {
        self.seeds
            .iter()
            .position(|seed| seed.seed_number == seed_number)
    }

    pub fn seed_numbers(&self) -> Vec<u32> {
        self.seeds.iter().map(|seed| seed.seed_number).collect()
    }
}

/// Does a seed whose slot holds `real` satisfy `assertion`?
pub fn slot_matches(assertion: Assertion, real: Option<PoiKind>) -> bool {
    match assertion {
        Assertion::Unmarked => true,
        Assertion::Unknown => !real.is_some_and(|kind| kind.is_landmark()),
        Assertion::Church => real == Some(PoiKind::Church),
        Assertion::Mage => real == Some(PoiKind::Mage),
        Assertion::Village => real == Some(PoiKind::Village),
        Assertion::Other => real.is_some_and(|kind| !kind.is_landmark()),
    }
}

/// Evaluate the observations against the catalog using `source`.
pub fn evaluate(
    catalog: &CatalogStore,
    state: &ObservationState,
    source: GroundTruthSource,
) -> MatchResult {
    match source.resolve(catalog) {
        GroundTruthSource::PoiDatabase => {
            evaluate_with(catalog, state, &PoiDatabaseTruth::new(catalog))
        }
        GroundTruthSource::Classifications => {
            evaluate_with(catalog, state, &ClassificationTruth::new(catalog))
        }
    }
}

/// Evaluate with an explicit ground-truth implementation.
pub fn evaluate_with(
    catalog: &CatalogStore,
    state: &ObservationState,
    truth: &dyn GroundTruth,
) -> MatchResult {
    if state.is_unconstrained() {
        return MatchResult::new(catalog.all_seeds(), MatchScope::Unconstrained);
    }

    let candidates = catalog.filter_seeds(state.nightlord(), state.map_type());
    let Some(map_type) = state.map_type().filter(|_| state.poi_filter_enabled()) else {
        return MatchResult::new(candidates, MatchScope::CatalogOnly);
    };

    let slots = slots_for(map_type);
    let total = candidates.len();
    let survivors = candidates
        .into_iter()
        .filter(|seed| seed_satisfies(seed, map_type, slots, state, truth))
        .collect::<Vec<_>>();
    tracing::debug!(
        map = %map_type,
        nightlord = state.nightlord().map(|choice| choice.as_str()).unwrap_or("any"),
        candidates = total,
        survivors = survivors.len(),
        "poi filter applied"
    );
    MatchResult::new(survivors, MatchScope::PoiFiltered)
}

fn seed_satisfies(
    seed: &SeedRecord,
    map_type: MapType,
    slots: &[SlotDefinition],
    state: &ObservationState,
    truth: &dyn GroundTruth,
) -> bool {
    slots.iter().all(|slot| {
        let assertion = state.assertion(slot.id);
        if assertion == Assertion::Unmarked {
            return true;
        }
        let real = truth.kind_at(seed, map_type, slot);
        let ok = slot_matches(assertion, real);
        if !ok {
            tracing::trace!(
                seed = seed.seed_number,
                slot = slot.id,
                asserted = %assertion,
                real = real.map(|kind| kind.as_str()).unwrap_or("nothing"),
                "seed rejected"
            );
        }
        ok
    })
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
