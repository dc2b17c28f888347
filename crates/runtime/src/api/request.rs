//! Typed requests accepted at the arena boundary.

use arena_core::{BattleId, PowerId, UserId};
use serde::{Deserialize, Serialize};

use super::errors::{Result, RuntimeError};

/// One client request, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    FindMatch {
        player_id: UserId,
    },
    CancelSearch {
        player_id: UserId,
    },
    CheckMatch {
        player_id: UserId,
    },
    BattleState {
        battle_id: BattleId,
    },
    /// Basic attack for the configured damage.
    Attack {
        battle_id: BattleId,
        player_id: UserId,
    },
    UsePower {
        battle_id: BattleId,
        user_id: UserId,
        power_id: PowerId,
    },
    Spin {
        user_id: UserId,
    },
    /// `slot` is validated against the loadout rules, not here.
    EquipPower {
        user_id: UserId,
        power_id: PowerId,
        slot: u8,
    },
    UnequipPower {
        user_id: UserId,
        power_id: PowerId,
    },
    Inventory {
        user_id: UserId,
    },
    UserStats {
        user_id: UserId,
    },
    Catalog,
}

impl Request {
    /// Parses a JSON request, reporting malformed input as `InvalidRequest`.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|err| RuntimeError::InvalidRequest(err.to_string()))
    }

    pub fn action(&self) -> &'static str {
        match self {
            Request::FindMatch { .. } => "find_match",
            Request::CancelSearch { .. } => "cancel_search",
            Request::CheckMatch { .. } => "check_match",
            Request::BattleState { .. } => "battle_state",
            Request::Attack { .. } => "attack",
            Request::UsePower { .. } => "use_power",
            Request::Spin { .. } => "spin",
            Request::EquipPower { .. } => "equip_power",
            Request::UnequipPower { .. } => "unequip_power",
            Request::Inventory { .. } => "inventory",
            Request::UserStats { .. } => "user_stats",
            Request::Catalog => "catalog",
        }
    }
}
