//! Typed catalog records.
//!
//! These types mirror the catalog JSON so the loader stays schema-driven and
//! every label is a closed enum by the time the filter sees it.
use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Boss identities a seed can be generated with.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nightlord {
    Gladius,
    Adel,
    Gnoster,
    Maris,
    Libra,
    Fulghor,
    Caligo,
    Heolstor,
}

impl Nightlord {
    pub const ALL: [Nightlord; 8] = [
        Nightlord::Gladius,
        Nightlord::Adel,
        Nightlord::Gnoster,
        Nightlord::Maris,
        Nightlord::Libra,
        Nightlord::Fulghor,
        Nightlord::Caligo,
        Nightlord::Heolstor,
    ];

    /// Return the stable identifier used in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            Nightlord::Gladius => "Gladius",
            Nightlord::Adel => "Adel",
            Nightlord::Gnoster => "Gnoster",
            Nightlord::Maris => "Maris",
            Nightlord::Libra => "Libra",
            Nightlord::Fulghor => "Fulghor",
            Nightlord::Caligo => "Caligo",
            Nightlord::Heolstor => "Heolstor",
        }
    }

    pub fn zh_name(&self) -> &'static str {
        match self {
            Nightlord::Gladius => "\"黑夜野兽\"格拉狄乌斯",
            Nightlord::Adel => "\"黑夜之爵\"艾德雷",
            Nightlord::Gnoster => "\"黑夜之智\"格诺斯塔",
            Nightlord::Maris => "\"深海黑夜\"玛丽斯",
            Nightlord::Libra => "\"黑夜之魔\"利普拉",
            Nightlord::Fulghor => "\"黑夜光骑士\"弗格尔",
            Nightlord::Caligo => "\"黑夜雾霾\"卡莉果",
            Nightlord::Heolstor => "\"黑夜王\"布德奇冥",
        }
    }
}

impl fmt::Display for Nightlord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Nightlord {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let key = normalize_label(value);
        Nightlord::ALL
            .into_iter()
            .find(|lord| normalize_label(lord.as_str()) == key)
            .ok_or_else(|| {
                anyhow!(
                    "unknown nightlord {value:?} (expected one of: {})",
                    join_labels(Nightlord::ALL.iter().map(Nightlord::as_str))
                )
            })
    }
}

/// A nightlord as the user chose it: a concrete identity or the `Unknown`
/// sentinel, which filters like "no nightlord constraint".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NightlordChoice {
    Known(Nightlord),
    Unknown,
}

impl NightlordChoice {
    /// The nightlord to constrain catalog queries by, if any.
    pub fn effective(&self) -> Option<Nightlord> {
        match self {
            NightlordChoice::Known(lord) => Some(*lord),
            NightlordChoice::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NightlordChoice::Known(lord) => lord.as_str(),
            NightlordChoice::Unknown => "Unknown",
        }
    }

    pub fn zh_name(&self) -> &'static str {
        match self {
            NightlordChoice::Known(lord) => lord.zh_name(),
            NightlordChoice::Unknown => "未知",
        }
    }
}

impl From<Nightlord> for NightlordChoice {
    fn from(lord: Nightlord) -> Self {
        NightlordChoice::Known(lord)
    }
}

impl fmt::Display for NightlordChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NightlordChoice {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        if normalize_label(value) == "unknown" {
            return Ok(NightlordChoice::Unknown);
        }
        value.parse::<Nightlord>().map(NightlordChoice::Known)
    }
}

/// Terrain layouts a seed can be generated on.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapType {
    Default,
    Mountaintop,
    Crater,
    #[serde(rename = "Rotted Woods")]
    RottedWoods,
    Noklateo,
}

impl MapType {
    pub const ALL: [MapType; 5] = [
        MapType::Default,
        MapType::Mountaintop,
        MapType::Crater,
        MapType::RottedWoods,
        MapType::Noklateo,
    ];

    /// Return the stable identifier used in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            MapType::Default => "Default",
            MapType::Mountaintop => "Mountaintop",
            MapType::Crater => "Crater",
            MapType::RottedWoods => "Rotted Woods",
            MapType::Noklateo => "Noklateo",
        }
    }

    pub fn zh_name(&self) -> &'static str {
        match self {
            MapType::Default => "默认",
            MapType::Mountaintop => "山顶",
            MapType::Crater => "火山口",
            MapType::RottedWoods => "腐败森林",
            MapType::Noklateo => "隐城",
        }
    }
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let key = normalize_label(value);
        MapType::ALL
            .into_iter()
            .find(|map| normalize_label(map.as_str()) == key)
            .ok_or_else(|| {
                anyhow!(
                    "unknown map type {value:?} (expected one of: {})",
                    join_labels(MapType::ALL.iter().map(MapType::as_str))
                )
            })
    }
}

/// Ground-truth kind of a POI. Labels other than church, mage and village
/// collapse into `Other`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PoiKind {
    #[serde(alias = "Church")]
    Church,
    #[serde(alias = "Mage")]
    Mage,
    #[serde(alias = "Village")]
    Village,
    #[serde(other)]
    Other,
}

impl PoiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoiKind::Church => "church",
            PoiKind::Mage => "mage",
            PoiKind::Village => "village",
            PoiKind::Other => "other",
        }
    }

    /// True for the three kinds players can identify on the map.
    pub fn is_landmark(&self) -> bool {
        matches!(self, PoiKind::Church | PoiKind::Mage | PoiKind::Village)
    }
}

impl fmt::Display for PoiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point in the 768x768 base coordinate space.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Key of a POI within a seed. Integer-like keys order first, ascending,
/// then any other key in lexical order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PoiId {
    Numeric(u32),
    Named(String),
}

impl PoiId {
    /// The numeric slot id, when the key is one.
    pub fn slot_id(&self) -> Option<u32> {
        match self {
            PoiId::Numeric(id) => Some(*id),
            PoiId::Named(_) => None,
        }
    }
}

impl From<u32> for PoiId {
    fn from(id: u32) -> Self {
        PoiId::Numeric(id)
    }
}

impl From<&str> for PoiId {
    fn from(key: &str) -> Self {
        match key.trim().parse::<u32>() {
            Ok(id) => PoiId::Numeric(id),
            Err(_) => PoiId::Named(key.to_string()),
        }
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoiId::Numeric(id) => f.pad(&id.to_string()),
            PoiId::Named(name) => f.pad(name),
        }
    }
}

impl Serialize for PoiId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PoiId::Numeric(id) => serializer.serialize_u32(*id),
            PoiId::Named(name) => serializer.serialize_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for PoiId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(PoiId::from(raw.as_str()))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PoiRecord {
    pub coordinates: Coordinates,
    #[serde(rename = "type")]
    pub kind: PoiKind,
}

/// One catalog seed. POIs iterate numeric slot ids first, ascending.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    /// Missing in some exports; the loader falls back to the map key.
    #[serde(default)]
    pub seed_number: u32,
    pub nightlord: Nightlord,
    pub map_type: MapType,
    #[serde(default)]
    pub pois: BTreeMap<PoiId, PoiRecord>,
}

impl SeedRecord {
    /// Zero-padded key used by the classification overlay and pattern images.
    pub fn padded_number(&self) -> String {
        padded_seed(self.seed_number)
    }
}

pub fn padded_seed(seed_number: u32) -> String {
    format!("{seed_number:03}")
}

/// CV label stored in the classification overlay. Labels outside the known
/// set read as `Other`, matching `PoiKind`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationLabel {
    #[serde(alias = "Church")]
    Church,
    #[serde(alias = "Mage")]
    Mage,
    #[serde(alias = "Village")]
    Village,
    #[serde(alias = "Nothing")]
    Nothing,
    #[serde(other)]
    Other,
}

impl ClassificationLabel {
    pub fn kind(&self) -> Option<PoiKind> {
        match self {
            ClassificationLabel::Church => Some(PoiKind::Church),
            ClassificationLabel::Mage => Some(PoiKind::Mage),
            ClassificationLabel::Village => Some(PoiKind::Village),
            ClassificationLabel::Nothing => None,
            ClassificationLabel::Other => Some(PoiKind::Other),
        }
    }
}

/// Padded seed key -> `POI<id>` -> label.
pub type Classifications = BTreeMap<String, BTreeMap<String, ClassificationLabel>>;

#[derive(Debug, Deserialize, Default)]
pub(crate) struct PoiDatabase {
    #[serde(default)]
    pub(crate) seeds: BTreeMap<String, serde_json::Value>,
}

/// Top-level catalog document. Seed records and the overlay stay raw here so
/// each can be typed, and rejected, on its own.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CatalogFile {
    #[serde(default)]
    pub(crate) poi_database: PoiDatabase,
    #[serde(default)]
    pub(crate) classifications: Option<serde_json::Value>,
}

/// Shared handle to a seed; match results hold these instead of copies.
pub type SeedRef = Arc<SeedRecord>;

fn normalize_label(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}
