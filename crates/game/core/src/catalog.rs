//! Power catalog: static definitions of powers and rarity tiers.
//!
//! The catalog is read-only to the arena. It is populated by an external
//! admin collaborator (or a content file) and consumed through the
//! [`PowerCatalog`] oracle trait.

use crate::spin::{self, SpinCandidate};
use crate::state::{PowerId, RarityId};

/// Behaviour class of a power.
///
/// Unrecognised type strings coming from the catalog deserialize to
/// [`PowerType::Unknown`] so that using such a power fails at resolution time
/// with `InvalidPowerType` instead of poisoning the whole catalog load.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PowerType {
    /// Deals `damage` to the opponent through normal attack resolution.
    Attack,
    /// Opens a shield window of `shield_duration` seconds.
    Defense,
    /// Opens a one-shot counter window that reflects `damage`.
    Counter,
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl PowerType {
    /// Lenient parse used by loaders: anything unrecognised becomes `Unknown`.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Unknown)
    }
}

/// A power as defined in the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerDefinition {
    pub id: PowerId,
    pub name: String,
    pub rarity_id: RarityId,
    pub power_type: PowerType,
    /// Reuse delay in seconds, scoped to one battle and one player.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    /// Used by `attack` and `counter` powers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: i32,
    /// Used by `defense` powers, in seconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub shield_duration: u32,
}

/// Rarity tier with its spin drop chance (percentage points).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rarity {
    pub id: RarityId,
    pub name: String,
    pub drop_chance: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<String>,
}

/// Read-only access to power and rarity definitions.
pub trait PowerCatalog: Send + Sync {
    /// Looks up a power by id.
    fn power(&self, id: PowerId) -> Option<PowerDefinition>;

    /// Looks up a rarity tier by id.
    fn rarity(&self, id: RarityId) -> Option<Rarity>;

    /// Every power in the catalog, in no particular order.
    fn powers(&self) -> Vec<PowerDefinition>;

    /// Powers joined with their rarity, in the fixed spin order:
    /// drop chance ascending, then power id ascending.
    ///
    /// Powers whose rarity is missing are left out, matching an inner join.
    fn spin_table(&self) -> Vec<SpinCandidate> {
        let mut table: Vec<SpinCandidate> = self
            .powers()
            .into_iter()
            .filter_map(|power| {
                let rarity = self.rarity(power.rarity_id)?;
                Some(SpinCandidate {
                    power,
                    rarity_name: rarity.name,
                    drop_chance: rarity.drop_chance,
                })
            })
            .collect();
        spin::sort_table(&mut table);
        table
    }
}
