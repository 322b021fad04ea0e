//! Read-only seed catalog.
//!
//! The catalog is loaded once and never mutated. Load failures degrade to an
//! empty catalog so callers can always proceed; a malformed seed record or
//! overlay is dropped on its own without taking the rest down.
mod store;
mod types;

pub use store::{CatalogStore, CatalogSummary};
pub use types::{
    padded_seed, ClassificationLabel, Classifications, Coordinates, MapType, Nightlord,
    NightlordChoice, PoiId, PoiKind, PoiRecord, SeedRecord, SeedRef,
};

/// Distance, in base coordinate units, within which a POI counts as being at
/// a slot.
pub const MATCH_TOLERANCE: f64 = 40.0;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
