//! Creature records as returned by the remote source.
//!
//! Only `id` and `name` drive the catch logic. The remaining fields are kept
//! for display and otherwise passed through untouched.

use serde::{Deserialize, Serialize};

/// A named link to another API resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    /// Resource name, e.g. `water`.
    pub name: String,
    /// Resource URL.
    #[serde(default)]
    pub url: String,
}

/// One of the creature's types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    /// Slot order (1 is the primary type).
    pub slot: u32,
    /// The type itself.
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// A base stat value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    /// Base value of the stat.
    pub base_stat: u32,
    /// Effort value yield.
    #[serde(default)]
    pub effort: u32,
    /// Which stat this is.
    pub stat: NamedResource,
}

/// Sprite image URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    /// Default front sprite, if the source has one.
    #[serde(default)]
    pub front_default: Option<String>,
}

/// A creature record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    /// Stable identifier assigned by the source.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Sort order in the source's national listing.
    #[serde(default)]
    pub order: i64,
    /// Height in decimetres.
    #[serde(default)]
    pub height: u32,
    /// Weight in hectograms.
    #[serde(default)]
    pub weight: u32,
    /// Experience granted when defeated.
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Types, ordered by slot.
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    /// Base stats.
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    /// Sprite URLs.
    #[serde(default)]
    pub sprites: Sprites,
}

impl Creature {
    /// A record with only an id and a name.
    pub fn named(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            order: 0,
            height: 0,
            weight: 0,
            base_experience: None,
            types: Vec::new(),
            stats: Vec::new(),
            sprites: Sprites::default(),
        }
    }

    /// Type names joined with `/`, primary type first.
    pub fn type_label(&self) -> String {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots
            .iter()
            .map(|t| t.kind.name.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Height in metres.
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Weight in kilograms.
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }
}
