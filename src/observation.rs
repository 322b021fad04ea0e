//! The player's current partial knowledge of the map on screen.
//!
//! This module only holds and mutates state; matching lives in `filter`.
use crate::catalog::{MapType, NightlordChoice};
use crate::slots::slots_for;
use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// What the player claims occupies a slot.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Assertion {
    /// Nothing asserted yet.
    #[default]
    Unmarked,
    Church,
    Mage,
    Village,
    /// A POI that is none of church, mage or village.
    Other,
    /// Not a church, mage or village; may be empty.
    Unknown,
}

impl Assertion {
    pub const ALL: [Assertion; 6] = [
        Assertion::Unmarked,
        Assertion::Church,
        Assertion::Mage,
        Assertion::Village,
        Assertion::Other,
        Assertion::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Assertion::Unmarked => "unmarked",
            Assertion::Church => "church",
            Assertion::Mage => "mage",
            Assertion::Village => "village",
            Assertion::Other => "other",
            Assertion::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Assertion {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let key = value.trim().to_ascii_lowercase();
        // "dot" is how unmarked slots are drawn on the canvas.
        if key == "dot" {
            return Ok(Assertion::Unmarked);
        }
        Assertion::ALL
            .into_iter()
            .find(|assertion| assertion.as_str() == key)
            .ok_or_else(|| {
                anyhow!(
                    "unknown assertion {value:?} (expected one of: {})",
                    Assertion::ALL.map(|assertion| assertion.as_str()).join(", ")
                )
            })
    }
}

/// Parse a `SLOT=STATE` pair such as `3=church`.
pub fn parse_slot_assertion(value: &str) -> Result<(u32, Assertion)> {
    let (slot, state) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("expected SLOT=STATE, got {value:?}"))?;
    let slot = slot
        .trim()
        .parse::<u32>()
        .with_context(|| format!("slot id {slot:?} is not a number"))?;
    Ok((slot, state.parse()?))
}

/// Nightlord, map type and per-slot assertions for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationState {
    nightlord: Option<NightlordChoice>,
    map_type: Option<MapType>,
    assertions: BTreeMap<u32, Assertion>,
    /// POI filter mode. When off, a chosen map only narrows the catalog query.
    poi_filter: bool,
}

impl Default for ObservationState {
    fn default() -> Self {
        Self {
            nightlord: None,
            map_type: None,
            assertions: BTreeMap::new(),
            poi_filter: true,
        }
    }
}

impl ObservationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nightlord(&self) -> Option<NightlordChoice> {
        self.nightlord
    }

    pub fn map_type(&self) -> Option<MapType> {
        self.map_type
    }

    /// Choose a nightlord, or clear it when it is already the active one.
    pub fn set_nightlord(&mut self, choice: NightlordChoice) {
        if self.nightlord == Some(choice) {
            self.nightlord = None;
        } else {
            self.nightlord = Some(choice);
        }
    }

    /// Choose a map type, or clear it when it is already active. Any change
    /// resets every assertion to unmarked over the new slot set.
    pub fn set_map_type(&mut self, map_type: MapType) {
        if self.map_type == Some(map_type) {
            self.map_type = None;
        } else {
            self.map_type = Some(map_type);
        }
        self.assertions = unmarked_slots(self.map_type);
    }

    /// Record an assertion. Returns false, leaving state untouched, when the
    /// slot is not part of the active map type or POI filter mode is off.
    pub fn set_assertion(&mut self, slot_id: u32, assertion: Assertion) -> bool {
        if !self.poi_filter {
            return false;
        }
        match self.assertions.get_mut(&slot_id) {
            Some(current) => {
                *current = assertion;
                true
            }
            None => false,
        }
    }

    pub fn clear_assertion(&mut self, slot_id: u32) -> bool {
        self.set_assertion(slot_id, Assertion::Unmarked)
    }

    pub fn clear_all_assertions(&mut self) {
        self.assertions.values_mut().for_each(|a| *a = Assertion::Unmarked);
    }

    pub fn poi_filter_enabled(&self) -> bool {
        self.poi_filter
    }

    /// Switch POI filter mode. Turning it on needs a map type; a refused
    /// change returns false and leaves state untouched. Any change clears
    /// every assertion.
    pub fn set_poi_filter(&mut self, enabled: bool) -> bool {
        if enabled && self.map_type.is_none() {
            return false;
        }
        if self.poi_filter != enabled {
            self.poi_filter = enabled;
            self.clear_all_assertions();
        }
        true
    }

    /// True when a map is chosen and POI filter mode is on.
    pub fn poi_filter_active(&self) -> bool {
        self.poi_filter && self.map_type.is_some()
    }

    /// Forget everything: nightlord, map type and assertions. POI filter
    /// mode returns to on.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Assertion for a slot; slots outside the active map read as unmarked.
    pub fn assertion(&self, slot_id: u32) -> Assertion {
        self.assertions.get(&slot_id).copied().unwrap_or_default()
    }

    pub fn assertions(&self) -> &BTreeMap<u32, Assertion> {
        &self.assertions
    }

    pub fn has_assertions(&self) -> bool {
        self.assertions.values().any(|a| *a != Assertion::Unmarked)
    }

    /// True when neither nightlord nor map type is chosen.
    pub fn is_unconstrained(&self) -> bool {
        self.nightlord.is_none() && self.map_type.is_none()
    }
}

fn unmarked_slots(map_type: Option<MapType>) -> BTreeMap<u32, Assertion> {
    map_type
        .map(|map| {
            slots_for(map)
                .iter()
                .map(|slot| (slot.id, Assertion::Unmarked))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Nightlord;

    #[test]
    fn nightlord_toggles_without_touching_assertions() {
        let mut state = ObservationState::new();
        state.set_map_type(MapType::Default);
        assert!(state.set_assertion(1, Assertion::Church));

        state.set_nightlord(Nightlord::Gladius.into());
        assert_eq!(state.nightlord(), Some(NightlordChoice::Known(Nightlord::Gladius)));
        state.set_nightlord(NightlordChoice::Unknown);
        assert_eq!(state.nightlord(), Some(NightlordChoice::Unknown));
        state.set_nightlord(NightlordChoice::Unknown);
        assert_eq!(state.nightlord(), None);
        assert_eq!(state.assertion(1), Assertion::Church);
    }

    #[test]
    fn map_change_resets_assertions_even_for_shared_slot_ids() {
        let mut state = ObservationState::new();
        state.set_map_type(MapType::Default);
        assert!(state.set_assertion(5, Assertion::Mage));
        assert!(state.set_assertion(9, Assertion::Other));

        state.set_map_type(MapType::Noklateo);
        assert_eq!(state.map_type(), Some(MapType::Noklateo));
        assert!(!state.has_assertions());
        assert_eq!(state.assertion(5), Assertion::Unmarked);
        assert_eq!(state.assertions().len(), 8);

        state.set_map_type(MapType::Noklateo);
        assert_eq!(state.map_type(), None);
        assert!(state.assertions().is_empty());
    }

    #[test]
    fn assertions_outside_active_slot_set_are_ignored() {
        let mut state = ObservationState::new();
        assert!(!state.set_assertion(1, Assertion::Church));

        state.set_map_type(MapType::Crater);
        assert!(!state.set_assertion(4, Assertion::Church));
        assert!(!state.set_assertion(42, Assertion::Village));
        assert!(!state.has_assertions());
    }

    #[test]
    fn clear_all_keeps_selection() {
        let mut state = ObservationState::new();
        state.set_nightlord(Nightlord::Libra.into());
        state.set_map_type(MapType::Mountaintop);
        state.set_assertion(1, Assertion::Village);
        state.set_assertion(2, Assertion::Unknown);

        state.clear_all_assertions();
        assert!(!state.has_assertions());
        assert_eq!(state.map_type(), Some(MapType::Mountaintop));
        assert!(state.nightlord().is_some());

        state.reset();
        assert!(state.is_unconstrained());
        assert!(state.assertions().is_empty());
    }

    #[test]
    fn poi_filter_mode_needs_a_map_and_clears_marks() {
        let mut state = ObservationState::new();
        assert!(state.poi_filter_enabled());
        assert!(!state.poi_filter_active());

        assert!(state.set_poi_filter(false));
        assert!(!state.set_poi_filter(true));
        assert!(!state.poi_filter_enabled());

        state.set_map_type(MapType::Default);
        assert!(state.set_poi_filter(true));
        assert!(state.poi_filter_active());
        assert!(state.set_assertion(1, Assertion::Church));

        assert!(state.set_poi_filter(false));
        assert!(!state.has_assertions());
        assert_eq!(state.map_type(), Some(MapType::Default));

        state.reset();
        assert!(state.poi_filter_enabled());
    }

    #[test]
    fn parses_slot_assertion_pairs() {
        assert_eq!(parse_slot_assertion("3=church").ok(), Some((3, Assertion::Church)));
        assert_eq!(parse_slot_assertion(" 7 = dot").ok(), Some((7, Assertion::Unmarked)));
        assert!(parse_slot_assertion("three=church").is_err());
        assert!(parse_slot_assertion("3").is_err());
        assert!(parse_slot_assertion("3=castle").is_err());
    }
}
