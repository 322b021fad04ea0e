use super::{CatalogStore, MapType, Nightlord, NightlordChoice, PoiId, PoiKind, MATCH_TOLERANCE};
use serde_json::json;

fn sample_catalog() -> CatalogStore {
    let doc = json!({
        "poiDatabase": {
            "seeds": {
                "1": {
                    "seedNumber": 1,
                    "nightlord": "Gladius",
                    "mapType": "Default",
                    "pois": {
                        "1": { "coordinates": { "x": 155, "y": 551 }, "type": "church" },
                        "4": { "coordinates": { "x": 280, "y": 308 }, "type": "Sorcerer's Rise" }
                    }
                },
                "2": {
                    "seedNumber": 2,
                    "nightlord": "Adel",
                    "mapType": "Crater",
                    "pois": {
                        "3": { "coordinates": { "x": 155, "y": 440 }, "type": "village" }
                    }
                },
                "12": {
                    "nightlord": "Gladius",
                    "mapType": "Rotted Woods",
                    "pois": {}
                }
            }
        },
        "classifications": {
            "001": { "POI1": "mage", "POI2": "nothing" }
        }
    });
    CatalogStore::from_json(doc.to_string().as_bytes()).expect("parse sample catalog")
}

#[test]
fn parses_records_and_falls_back_to_key_for_seed_number() {
    let store = sample_catalog();
    assert_eq!(store.len(), 3);
    let seed = store.seed_by_number(12).expect("seed 12");
    assert_eq!(seed.map_type, MapType::RottedWoods);
    assert!(seed.pois.is_empty());
    assert!(store.seed_by_number(99).is_none());
}

#[test]
fn unrecognized_poi_labels_read_as_other() {
    let store = sample_catalog();
    let seed = store.seed_by_number(1).expect("seed 1");
    assert_eq!(seed.pois.get(&PoiId::Numeric(4)).map(|poi| poi.kind), Some(PoiKind::Other));
}

#[test]
fn filter_treats_missing_and_unknown_nightlord_as_wildcards() {
    let store = sample_catalog();
    let numbers = |seeds: Vec<super::SeedRef>| {
        seeds.iter().map(|seed| seed.seed_number).collect::<Vec<_>>()
    };

    assert_eq!(numbers(store.filter_seeds(None, None)), vec![1, 2, 12]);
    assert_eq!(
        numbers(store.filter_seeds(Some(Nightlord::Gladius.into()), None)),
        vec![1, 12]
    );
    assert_eq!(
        numbers(store.filter_seeds(None, Some(MapType::Crater))),
        vec![2]
    );
    assert_eq!(
        store.filter_seeds(Some(NightlordChoice::Unknown), Some(MapType::Default)),
        store.filter_seeds(None, Some(MapType::Default))
    );
    assert!(store
        .filter_seeds(Some(Nightlord::Adel.into()), Some(MapType::Default))
        .is_empty());
}

#[test]
fn poi_lookup_honours_tolerance_boundary() {
    let store = sample_catalog();
    assert_eq!(
        store.poi_type_at_coordinate(1, 155.0 + 40.0, 551.0, MATCH_TOLERANCE),
        Some(PoiKind::Church)
    );
    assert_eq!(
        store.poi_type_at_coordinate(1, 155.0 + 40.5, 551.0, MATCH_TOLERANCE),
        None
    );
    assert_eq!(
        store.poi_type_at_coordinate(404, 155.0, 551.0, MATCH_TOLERANCE),
        None
    );
}

#[test]
fn poi_lookup_returns_first_hit_not_nearest() {
    let doc = json!({
        "poiDatabase": { "seeds": { "7": {
            "seedNumber": 7,
            "nightlord": "Maris",
            "mapType": "Default",
            "pois": {
                "10": { "coordinates": { "x": 100, "y": 100 }, "type": "village" },
                "2": { "coordinates": { "x": 130, "y": 100 }, "type": "mage" }
            }
        } } }
    });
    let store = CatalogStore::from_json(doc.to_string().as_bytes()).expect("parse catalog");
    // (101, 100) is nearest to slot 10 but slot 2 comes first in id order.
    assert_eq!(
        store.poi_type_at_coordinate(7, 101.0, 100.0, MATCH_TOLERANCE),
        Some(PoiKind::Mage)
    );
}

#[test]
fn classification_overlay_uses_padded_seed_and_nothing_sentinel() {
    let store = sample_catalog();
    assert!(store.has_classifications());
    assert_eq!(store.classified_seed_count(), 1);
    assert_eq!(
        store.classification_at(1, MapType::Default, 155.0, 551.0, MATCH_TOLERANCE),
        Some(PoiKind::Mage)
    );
    assert_eq!(
        store.classification_at(1, MapType::Default, 350.0, 545.0, MATCH_TOLERANCE),
        None
    );
    assert_eq!(
        store.classification_at(2, MapType::Default, 155.0, 551.0, MATCH_TOLERANCE),
        None
    );
}

#[test]
fn missing_or_malformed_catalog_degrades_to_empty() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let missing = CatalogStore::load_or_empty(&dir.path().join("absent.json"));
    assert!(missing.is_empty());
    assert!(missing.all_seeds().is_empty());
    assert!(missing.seed_by_number(1).is_none());

    let broken_path = dir.path().join("broken.json");
    std::fs::write(&broken_path, b"{ \"poiDatabase\": ").expect("write broken catalog");
    let broken = CatalogStore::load_or_empty(&broken_path);
    assert!(broken.is_empty());
    assert!(CatalogStore::try_load(&broken_path).is_err());
}

#[test]
fn unreadable_overlay_is_dropped_but_seeds_survive() {
    let doc = json!({
        "poiDatabase": { "seeds": { "1": {
            "seedNumber": 1,
            "nightlord": "Gladius",
            "mapType": "Default",
            "pois": { "1": { "coordinates": { "x": 155, "y": 551 }, "type": "church" } }
        } } },
        "classifications": { "001": ["church"] }
    });
    let store = CatalogStore::from_json(doc.to_string().as_bytes()).expect("parse catalog");
    assert_eq!(store.len(), 1);
    assert!(!store.has_classifications());
    assert_eq!(
        store.poi_type_at_coordinate(1, 155.0, 551.0, MATCH_TOLERANCE),
        Some(PoiKind::Church)
    );
}

#[test]
fn overlay_labels_accept_capitalised_and_unfamiliar_names() {
    let doc = json!({
        "poiDatabase": { "seeds": {} },
        "classifications": {
            "001": { "POI1": "Church", "POI2": "Nothing", "POI3": "Great Church" }
        }
    });
    let store = CatalogStore::from_json(doc.to_string().as_bytes()).expect("parse catalog");
    assert!(store.has_classifications());
    assert_eq!(
        store.classification_at(1, MapType::Default, 155.0, 551.0, MATCH_TOLERANCE),
        Some(PoiKind::Church)
    );
    assert_eq!(
        store.classification_at(1, MapType::Default, 350.0, 545.0, MATCH_TOLERANCE),
        None
    );
    assert_eq!(
        store.classification_at(1, MapType::Default, 155.0, 436.0, MATCH_TOLERANCE),
        Some(PoiKind::Other)
    );
}

#[test]
fn named_poi_keys_are_kept_after_numeric_ones() {
    let doc = json!({
        "poiDatabase": { "seeds": {
            "1": {
                "seedNumber": 1,
                "nightlord": "Gladius",
                "mapType": "Default",
                "pois": { "1": { "coordinates": { "x": 155, "y": 551 }, "type": "church" } }
            },
            "2": {
                "seedNumber": 2,
                "nightlord": "Adel",
                "mapType": "Default",
                "pois": {
                    "a1": { "coordinates": { "x": 160, "y": 551 }, "type": "village" },
                    "9": { "coordinates": { "x": 155, "y": 551 }, "type": "mage" }
                }
            }
        } }
    });
    let store = CatalogStore::from_json(doc.to_string().as_bytes()).expect("parse catalog");
    assert_eq!(store.len(), 2);
    let seed = store.seed_by_number(2).expect("seed 2");
    let keys = seed.pois.keys().cloned().collect::<Vec<_>>();
    assert_eq!(keys, vec![PoiId::Numeric(9), PoiId::from("a1")]);
    assert_eq!(
        store.poi_type_at_coordinate(2, 158.0, 551.0, MATCH_TOLERANCE),
        Some(PoiKind::Mage)
    );
}

#[test]
fn malformed_seed_record_is_skipped_alone() {
    let doc = json!({
        "poiDatabase": { "seeds": {
            "1": { "seedNumber": 1, "nightlord": "Gladius", "mapType": "Default", "pois": {} },
            "2": { "seedNumber": 2, "nightlord": "Nobody", "mapType": "Default", "pois": {} },
            "3": { "seedNumber": 3, "nightlord": "Adel", "mapType": "Volcano", "pois": {} },
            "x": { "nightlord": "Adel", "mapType": "Crater", "pois": {} }
        } }
    });
    let store = CatalogStore::from_json(doc.to_string().as_bytes()).expect("parse catalog");
    assert_eq!(store.len(), 1);
    assert!(store.seed_by_number(1).is_some());
    assert!(store.seed_by_number(2).is_none());
}

#[test]
fn summary_counts_by_map_and_nightlord() {
    let summary = sample_catalog().summary();
    assert_eq!(summary.seed_count, 3);
    assert_eq!(summary.classified_seed_count, 1);
    assert_eq!(summary.by_nightlord.get("Gladius"), Some(&2));
    assert_eq!(summary.by_map_type.get("Rotted Woods"), Some(&1));
}

#[test]
fn labels_parse_case_and_spacing_insensitively() {
    assert_eq!("rotted-woods".parse::<MapType>().ok(), Some(MapType::RottedWoods));
    assert_eq!("GLADIUS".parse::<Nightlord>().ok(), Some(Nightlord::Gladius));
    assert_eq!(
        "unknown".parse::<NightlordChoice>().ok(),
        Some(NightlordChoice::Unknown)
    );
    let err = "Volcano".parse::<MapType>().expect_err("unknown map");
    assert!(err.to_string().contains("Noklateo"));
}
