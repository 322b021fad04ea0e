//! Report shapes for CLI output.
//!
//! Every command builds one serializable report; `--json` prints it verbatim
//! and the text printers below render the same data for a terminal.
use crate::catalog::{CatalogSummary, PoiId, PoiKind, SeedRecord};
use crate::config::{Locale, ResolvedConfig};
use crate::filter::{GroundTruthSource, MatchScope};
use crate::observation::Assertion;
use crate::session::Session;
use crate::slots::{slot_at, SlotDefinition};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Seeds listed in text output before eliding the rest.
const TEXT_SEED_LIMIT: usize = 40;

#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub scope: MatchScope,
    pub ground_truth: GroundTruthSource,
    pub nightlord: Option<String>,
    pub map_type: Option<String>,
    pub poi_filter: bool,
    pub assertions: Vec<SlotAssertion>,
    pub count: usize,
    pub seeds: Vec<SeedLine>,
    pub definitive_match: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SlotAssertion {
    pub slot: u32,
    pub assertion: Assertion,
}

#[derive(Debug, Serialize)]
pub struct SeedLine {
    pub seed_number: u32,
    pub nightlord: String,
    pub map_type: String,
}

#[derive(Debug, Serialize)]
pub struct SeedReport {
    pub seed_number: u32,
    pub nightlord: String,
    pub map_type: String,
    pub pattern_image: String,
    pub pois: Vec<PoiLine>,
}

#[derive(Debug, Serialize)]
pub struct PoiLine {
    pub id: PoiId,
    pub x: f64,
    pub y: f64,
    pub kind: PoiKind,
    /// Slot of the seed's map drawn under this POI, if any.
    pub slot: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SlotsReport {
    pub map_type: String,
    pub slots: Vec<SlotDefinition>,
}

#[derive(Debug, Serialize)]
pub struct LocateReport {
    pub seed_number: u32,
    pub x: f64,
    pub y: f64,
    pub tolerance: f64,
    pub found: bool,
    pub kind: Option<PoiKind>,
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub config_path: Option<String>,
    pub catalog_path: String,
    pub ground_truth: GroundTruthSource,
    pub locale: Locale,
    #[serde(flatten)]
    pub summary: CatalogSummary,
}

impl MatchReport {
    pub fn from_session(session: &Session, locale: Locale) -> Self {
        let state = session.state();
        let matches = session.matches();
        Self {
            scope: matches.scope(),
            ground_truth: session.source(),
            nightlord: state
                .nightlord()
                .map(|choice| locale.nightlord_label(choice).to_string()),
            map_type: state
                .map_type()
                .map(|map| locale.map_label(map).to_string()),
            poi_filter: state.poi_filter_enabled(),
            assertions: state
                .assertions()
                .iter()
                .filter(|(_, assertion)| **assertion != Assertion::Unmarked)
                .map(|(slot, assertion)| SlotAssertion {
                    slot: *slot,
                    assertion: *assertion,
                })
                .collect(),
            count: matches.len(),
            seeds: matches
                .seeds()
                .iter()
                .map(|seed| SeedLine::new(seed, locale))
                .collect(),
            definitive_match: session.definitive_match().map(|seed| seed.seed_number),
        }
    }
}

impl SeedLine {
    pub fn new(seed: &SeedRecord, locale: Locale) -> Self {
        Self {
            seed_number: seed.seed_number,
            nightlord: locale.nightlord_label(seed.nightlord.into()).to_string(),
            map_type: locale.map_label(seed.map_type).to_string(),
        }
    }
}

impl SeedReport {
    pub fn new(seed: &SeedRecord, config: &ResolvedConfig) -> Self {
        let locale = config.config.locale;
        Self {
            seed_number: seed.seed_number,
            nightlord: locale.nightlord_label(seed.nightlord.into()).to_string(),
            map_type: locale.map_label(seed.map_type).to_string(),
            pattern_image: config.pattern_image(seed.seed_number).display().to_string(),
            pois: seed
                .pois
                .iter()
                .map(|(id, poi)| PoiLine {
                    id: id.clone(),
                    x: poi.coordinates.x,
                    y: poi.coordinates.y,
                    kind: poi.kind,
                    slot: slot_at(seed.map_type, poi.coordinates.x, poi.coordinates.y)
                        .map(|slot| slot.id),
                })
                .collect(),
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialize report")?;
    println!("{text}");
    Ok(())
}

pub fn print_match(report: &MatchReport) {
    println!("scope: {}", report.scope.as_str());
    println!("ground_truth: {}", report.ground_truth);
    println!(
        "nightlord: {}",
        report.nightlord.as_deref().unwrap_or("(none)")
    );
    println!("map: {}", report.map_type.as_deref().unwrap_or("(none)"));
    if !report.poi_filter {
        println!("poi filter: off");
    }
    if !report.assertions.is_empty() {
        let marks = report
            .assertions
            .iter()
            .map(|entry| format!("{}={}", entry.slot, entry.assertion))
            .collect::<Vec<_>>()
            .join(" ");
        println!("slots: {marks}");
    }
    println!("matches: {}", report.count);
    if let Some(seed) = report.definitive_match {
        println!("definitive: {seed}");
    }
    if report.seeds.is_empty() {
        println!("no seeds match these observations");
        return;
    }
    println!();
    for seed in report.seeds.iter().take(TEXT_SEED_LIMIT) {
        println!(
            "  {:>4}  {:<10}  {}",
            seed.seed_number, seed.nightlord, seed.map_type
        );
    }
    if report.seeds.len() > TEXT_SEED_LIMIT {
        println!("  ... {} more (use --json)", report.seeds.len() - TEXT_SEED_LIMIT);
    }
}

pub fn print_seed(report: &SeedReport) {
    println!("seed: {}", report.seed_number);
    println!("nightlord: {}", report.nightlord);
    println!("map: {}", report.map_type);
    println!("pattern: {}", report.pattern_image);
    println!("pois: {}", report.pois.len());
    for poi in &report.pois {
        let slot = poi
            .slot
            .map(|slot| format!("slot {slot}"))
            .unwrap_or_else(|| "off-slot".to_string());
        println!(
            "  POI{:<3} ({:>5.1}, {:>5.1})  {:<8} {slot}",
            poi.id,
            poi.x,
            poi.y,
            poi.kind.as_str()
        );
    }
}

pub fn print_slots(report: &SlotsReport) {
    println!("map: {}", report.map_type);
    for slot in &report.slots {
        println!("  {:>2}  ({:>5.1}, {:>5.1})", slot.id, slot.x, slot.y);
    }
}

pub fn print_locate(report: &LocateReport) {
    let kind = report.kind.map(|kind| kind.as_str()).unwrap_or("nothing");
    println!(
        "seed {} at ({}, {}) within {}: {kind}",
        report.seed_number, report.x, report.y, report.tolerance
    );
}

pub fn print_status(report: &StatusReport) {
    println!(
        "config: {}",
        report.config_path.as_deref().unwrap_or("(defaults)")
    );
    println!("catalog: {}", report.catalog_path);
    println!("ground_truth: {}", report.ground_truth);
    println!("seeds: {}", report.summary.seed_count);
    println!("classified: {}", report.summary.classified_seed_count);
    print_counts("by map", &report.summary.by_map_type);
    print_counts("by nightlord", &report.summary.by_nightlord);
}

fn print_counts(label: &str, counts: &BTreeMap<String, usize>) {
    if counts.is_empty() {
        return;
    }
    println!("{label}:");
    for (name, count) in counts {
        println!("  {name:<14} {count}");
    }
}
