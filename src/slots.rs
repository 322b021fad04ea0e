//! Static POI slot geometry per map type.
//!
//! Coordinates are in the 768x768 base space shared by the canvas and the
//! catalog, so hit-testing and ground-truth lookups use the same numbers.
use crate::catalog::MapType;
use serde::Serialize;

/// Side length of the base coordinate space.
pub const CANVAS_SIZE: f64 = 768.0;
/// Rendered icon size; clicks within half of it select a slot.
pub const ICON_SIZE: f64 = 38.0;

/// A fixed location on a map type that may host a POI.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct SlotDefinition {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl SlotDefinition {
    const fn new(id: u32, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

const DEFAULT_SLOTS: &[SlotDefinition] = &[
    SlotDefinition::new(1, 155.0, 551.0),
    SlotDefinition::new(2, 350.0, 545.0),
    SlotDefinition::new(3, 155.0, 436.0),
    SlotDefinition::new(4, 280.0, 308.0),
    SlotDefinition::new(5, 165.0, 284.0),
    SlotDefinition::new(6, 436.0, 620.0),
    SlotDefinition::new(7, 420.0, 495.0),
    SlotDefinition::new(8, 620.0, 455.0),
    SlotDefinition::new(9, 530.0, 285.0),
    SlotDefinition::new(10, 595.0, 278.0),
    SlotDefinition::new(11, 410.0, 180.0),
];

const CRATER_SLOTS: &[SlotDefinition] = &[
    SlotDefinition::new(1, 155.0, 551.0),
    SlotDefinition::new(2, 348.0, 545.0),
    SlotDefinition::new(3, 155.0, 440.0),
    SlotDefinition::new(5, 165.0, 284.0),
    SlotDefinition::new(6, 436.0, 630.0),
    SlotDefinition::new(7, 420.0, 495.0),
    SlotDefinition::new(8, 620.0, 455.0),
    SlotDefinition::new(9, 530.0, 295.0),
    SlotDefinition::new(10, 595.0, 278.0),
];

const ROTTED_WOODS_SLOTS: &[SlotDefinition] = &[
    SlotDefinition::new(1, 153.0, 557.0),
    SlotDefinition::new(2, 350.0, 545.0),
    SlotDefinition::new(3, 155.0, 442.0),
    SlotDefinition::new(4, 275.0, 315.0),
    SlotDefinition::new(5, 165.0, 284.0),
    SlotDefinition::new(9, 530.0, 285.0),
    SlotDefinition::new(10, 597.0, 285.0),
    SlotDefinition::new(11, 410.0, 180.0),
];

const MOUNTAINTOP_SLOTS: &[SlotDefinition] = &[
    SlotDefinition::new(1, 155.0, 551.0),
    SlotDefinition::new(2, 345.0, 547.0),
    SlotDefinition::new(3, 155.0, 440.0),
    SlotDefinition::new(6, 436.0, 620.0),
    SlotDefinition::new(7, 420.0, 495.0),
    SlotDefinition::new(8, 620.0, 460.0),
    SlotDefinition::new(9, 530.0, 285.0),
    SlotDefinition::new(10, 595.0, 278.0),
    SlotDefinition::new(11, 410.0, 180.0),
];

const NOKLATEO_SLOTS: &[SlotDefinition] = &[
    SlotDefinition::new(4, 278.0, 308.0),
    SlotDefinition::new(5, 165.0, 284.0),
    SlotDefinition::new(6, 436.0, 620.0),
    SlotDefinition::new(7, 420.0, 495.0),
    SlotDefinition::new(8, 620.0, 455.0),
    SlotDefinition::new(9, 530.0, 287.0),
    SlotDefinition::new(10, 595.0, 278.0),
    SlotDefinition::new(11, 410.0, 182.0),
];

/// Slot table for a map type, in table order.
pub fn slots_for(map: MapType) -> &'static [SlotDefinition] {
    match map {
        MapType::Default => DEFAULT_SLOTS,
        MapType::Crater => CRATER_SLOTS,
        MapType::RottedWoods => ROTTED_WOODS_SLOTS,
        MapType::Mountaintop => MOUNTAINTOP_SLOTS,
        MapType::Noklateo => NOKLATEO_SLOTS,
    }
}

pub fn slot_by_id(map: MapType, id: u32) -> Option<&'static SlotDefinition> {
    slots_for(map).iter().find(|slot| slot.id == id)
}

/// First slot in table order within `tolerance` of `(x, y)`.
pub fn resolve_slot(
    map: MapType,
    x: f64,
    y: f64,
    tolerance: f64,
) -> Option<&'static SlotDefinition> {
    slots_for(map)
        .iter()
        .find(|slot| slot.distance_to(x, y) <= tolerance)
}

/// Canvas hit-test: the slot whose icon covers `(x, y)`.
pub fn slot_at(map: MapType, x: f64, y: f64) -> Option<&'static SlotDefinition> {
    resolve_slot(map, x, y, ICON_SIZE / 2.0)
}
