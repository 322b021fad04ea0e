//! One player's narrowing session.
//!
//! Every command mutates the observation state, recomputes the match result
//! synchronously and resets the cursor. There is no batching.
use crate::catalog::{CatalogStore, MapType, NightlordChoice, SeedRef};
use crate::cursor::{Direction, NavigationCursor};
use crate::filter::{evaluate, GroundTruthSource, MatchResult, MatchScope};
use crate::observation::{Assertion, ObservationState};

pub struct Session {
    catalog: CatalogStore,
    source: GroundTruthSource,
    state: ObservationState,
    matches: MatchResult,
    cursor: NavigationCursor,
}

impl Session {
    pub fn new(catalog: CatalogStore, source: GroundTruthSource) -> Self {
        let source = source.resolve(&catalog);
        let state = ObservationState::new();
        let matches = evaluate(&catalog, &state, source);
        let cursor = NavigationCursor::new(matches.len());
        Self {
            catalog,
            source,
            state,
            matches,
            cursor,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn source(&self) -> GroundTruthSource {
        self.source
    }

    pub fn state(&self) -> &ObservationState {
        &self.state
    }

    pub fn matches(&self) -> &MatchResult {
        &self.matches
    }

    pub fn cursor(&self) -> &NavigationCursor {
        &self.cursor
    }

    pub fn toggle_nightlord(&mut self, choice: NightlordChoice) {
        self.state.set_nightlord(choice);
        self.recompute();
    }

    pub fn toggle_map_type(&mut self, map_type: MapType) {
        self.state.set_map_type(map_type);
        self.recompute();
    }

    /// Returns false when the slot is not on the active map or POI filter
    /// mode is off; the result is recomputed either way.
    pub fn set_assertion(&mut self, slot_id: u32, assertion: Assertion) -> bool {
        let applied = self.state.set_assertion(slot_id, assertion);
        if !applied {
            tracing::debug!(
                slot = slot_id,
                poi_filter = self.state.poi_filter_enabled(),
                "assertion ignored"
            );
        }
        self.recompute();
        applied
    }

    pub fn clear_assertion(&mut self, slot_id: u32) -> bool {
        self.set_assertion(slot_id, Assertion::Unmarked)
    }

    pub fn clear_all_assertions(&mut self) {
        self.state.clear_all_assertions();
        self.recompute();
    }

    /// Switch POI filter mode, clearing every assertion. Turning it on
    /// without a map type is refused and returns false.
    pub fn set_poi_filter(&mut self, enabled: bool) -> bool {
        let applied = self.state.set_poi_filter(enabled);
        if applied {
            self.recompute();
        } else {
            tracing::debug!("poi filter mode needs a map type");
        }
        applied
    }

    pub fn toggle_poi_filter(&mut self) -> bool {
        let enabled = !self.state.poi_filter_enabled();
        self.set_poi_filter(enabled)
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.recompute();
    }

    pub fn step(&mut self, direction: Direction) -> bool {
        self.cursor.step(direction)
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        self.cursor.select_index(index)
    }

    /// Move the cursor onto a seed in the current result.
    pub fn select_seed(&mut self, seed_number: u32) -> bool {
        match self.matches.position_of(seed_number) {
            Some(index) => self.cursor.select_index(index),
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&SeedRef> {
        self.cursor.index().and_then(|index| self.matches.get(index))
    }

    pub fn seed(&self, seed_number: u32) -> Option<SeedRef> {
        self.catalog.seed_by_number(seed_number)
    }

    /// The single surviving seed once nightlord and map are both chosen and
    /// POI filter mode is on. Consumers may auto-select it.
    pub fn definitive_match(&self) -> Option<&SeedRef> {
        let filtering = self.matches.scope() == MatchScope::PoiFiltered
            && self.state.poi_filter_active()
            && self.state.nightlord().is_some();
        if !filtering {
            return None;
        }
        self.matches.single()
    }

    /// With POI filter mode off and both nightlord and map chosen, the first
    /// seed of the catalog query is shown straight away.
    pub fn browse_default(&self) -> Option<&SeedRef> {
        let browsing = !self.state.poi_filter_enabled()
            && self.state.nightlord().is_some()
            && self.state.map_type().is_some();
        if !browsing {
            return None;
        }
        self.matches.get(0)
    }

    fn recompute(&mut self) {
        self.matches = evaluate(&self.catalog, &self.state, self.source);
        self.cursor.reset(self.matches.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Coordinates, Nightlord, PoiId, PoiKind, PoiRecord, SeedRecord};

    fn record(number: u32, nightlord: Nightlord, kind: PoiKind) -> SeedRecord {
        SeedRecord {
            seed_number: number,
            nightlord,
            map_type: MapType::Default,
            pois: [(
                PoiId::Numeric(1),
                PoiRecord {
                    coordinates: Coordinates { x: 155.0, y: 551.0 },
                    kind,
                },
            )]
            .into_iter()
            .collect(),
        }
    }

    fn session() -> Session {
        let catalog = CatalogStore::from_records([
            record(3, Nightlord::Gladius, PoiKind::Church),
            record(1, Nightlord::Gladius, PoiKind::Mage),
            record(2, Nightlord::Caligo, PoiKind::Church),
        ]);
        Session::new(catalog, GroundTruthSource::PoiDatabase)
    }

    #[test]
    fn starts_unconstrained_with_sorted_catalog() {
        let session = session();
        assert_eq!(session.matches().scope(), MatchScope::Unconstrained);
        assert_eq!(session.matches().seed_numbers(), vec![1, 2, 3]);
        assert!(session.selected().is_none());
    }

    #[test]
    fn every_command_resets_cursor() {
        let mut session = session();
        assert!(session.step(Direction::Next));
        assert!(session.step(Direction::Next));
        assert_eq!(session.selected().map(|seed| seed.seed_number), Some(2));

        session.toggle_map_type(MapType::Default);
        assert_eq!(session.cursor().index(), None);
        assert!(session.select_seed(3));
        session.set_assertion(1, Assertion::Church);
        assert_eq!(session.cursor().index(), None);
        assert_eq!(session.matches().seed_numbers(), vec![2, 3]);
    }

    #[test]
    fn definitive_match_requires_nightlord_map_and_poi_filter() {
        let mut session = session();
        session.toggle_map_type(MapType::Default);
        session.set_assertion(1, Assertion::Mage);
        assert_eq!(session.matches().seed_numbers(), vec![1]);
        assert!(session.definitive_match().is_none());

        session.toggle_nightlord(Nightlord::Gladius.into());
        assert_eq!(
            session.definitive_match().map(|seed| seed.seed_number),
            Some(1)
        );

        session.clear_all_assertions();
        assert!(session.definitive_match().is_none());
        assert_eq!(session.matches().seed_numbers(), vec![1, 3]);

        session.toggle_nightlord(Nightlord::Gladius.into());
        session.toggle_nightlord(Nightlord::Caligo.into());
        assert_eq!(
            session.definitive_match().map(|seed| seed.seed_number),
            Some(2)
        );
        assert!(session.set_poi_filter(false));
        assert_eq!(session.matches().seed_numbers(), vec![2]);
        assert!(session.definitive_match().is_none());
    }

    #[test]
    fn poi_filter_toggle_clears_marks_and_needs_a_map() {
        let mut session = session();
        assert!(session.toggle_poi_filter());
        assert!(!session.state().poi_filter_enabled());
        assert!(!session.toggle_poi_filter());
        assert!(!session.state().poi_filter_enabled());

        session.toggle_map_type(MapType::Default);
        assert!(!session.set_assertion(1, Assertion::Church));
        assert_eq!(session.matches().scope(), MatchScope::CatalogOnly);
        assert!(session.toggle_poi_filter());
        assert!(session.set_assertion(1, Assertion::Church));
        assert_eq!(session.matches().seed_numbers(), vec![2, 3]);

        assert!(session.step(Direction::Next));
        assert!(session.toggle_poi_filter());
        assert!(!session.state().has_assertions());
        assert_eq!(session.cursor().index(), None);
        assert_eq!(session.matches().scope(), MatchScope::CatalogOnly);
        assert_eq!(session.matches().seed_numbers(), vec![1, 2, 3]);
    }

    #[test]
    fn browsing_without_poi_filter_offers_first_seed() {
        let mut session = session();
        session.toggle_map_type(MapType::Default);
        assert!(session.browse_default().is_none());
        assert!(session.set_poi_filter(false));
        assert!(session.browse_default().is_none());
        session.toggle_nightlord(Nightlord::Gladius.into());
        assert_eq!(
            session.browse_default().map(|seed| seed.seed_number),
            Some(1)
        );
    }

    #[test]
    fn invalid_slot_is_ignored_but_still_recomputes() {
        let mut session = session();
        session.toggle_map_type(MapType::Default);
        assert!(session.step(Direction::Next));
        assert!(!session.set_assertion(99, Assertion::Church));
        assert_eq!(session.cursor().index(), None);
        assert_eq!(session.matches().len(), 3);
    }

    #[test]
    fn reset_returns_to_whole_catalog() {
        let mut session = session();
        session.toggle_nightlord(Nightlord::Caligo.into());
        session.toggle_map_type(MapType::Default);
        session.set_assertion(1, Assertion::Village);
        assert!(session.matches().is_empty());

        session.reset();
        assert_eq!(session.matches().scope(), MatchScope::Unconstrained);
        assert_eq!(session.matches().len(), 3);
        assert!(session.seed(2).is_some());
        assert!(session.seed(9).is_none());
    }
}
