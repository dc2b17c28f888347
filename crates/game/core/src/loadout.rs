//! Inventory ownership and equip-slot rules.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{PowerId, Timestamp, UserId};

/// One of the three loadout slots a power can be equipped into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct EquipSlot(u8);

impl EquipSlot {
    pub const COUNT: u8 = 3;

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = EquipSlot> {
        (1..=Self::COUNT).map(EquipSlot)
    }
}

impl TryFrom<u8> for EquipSlot {
    type Error = LoadoutError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=Self::COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LoadoutError::InvalidSlot(value))
        }
    }
}

impl From<EquipSlot> for u8 {
    fn from(slot: EquipSlot) -> u8 {
        slot.0
    }
}

/// A power owned by a user.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserPower {
    pub user_id: UserId,
    pub power_id: PowerId,
    pub obtained_at: Timestamp,
    pub equipped_slot: Option<EquipSlot>,
}

impl UserPower {
    pub fn new(user_id: UserId, power_id: PowerId, obtained_at: Timestamp) -> Self {
        Self {
            user_id,
            power_id,
            obtained_at,
            equipped_slot: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadoutError {
    #[error("slot {0} is not a loadout slot (expected 1..=3)")]
    InvalidSlot(u8),

    #[error("power {0} is not owned")]
    NotOwned(PowerId),
}

impl GameError for LoadoutError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSlot(_) => "LOADOUT_INVALID_SLOT",
            Self::NotOwned(_) => "LOADOUT_NOT_OWNED",
        }
    }
}

/// Result of an equip: the power that was pushed out of the slot, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EquipChange {
    pub slot: EquipSlot,
    pub displaced: Option<PowerId>,
}

/// Equips `power_id` into `slot`, unequipping whatever occupied it.
///
/// `inventory` is the full list of one user's powers. A power already sitting
/// in another slot moves, so a slot never holds more than one power.
pub fn equip(
    inventory: &mut [UserPower],
    power_id: PowerId,
    slot: EquipSlot,
) -> Result<EquipChange, LoadoutError> {
    if !inventory.iter().any(|owned| owned.power_id == power_id) {
        return Err(LoadoutError::NotOwned(power_id));
    }

    let mut displaced = None;
    for owned in inventory.iter_mut() {
        if owned.power_id == power_id {
            owned.equipped_slot = Some(slot);
        } else if owned.equipped_slot == Some(slot) {
            owned.equipped_slot = None;
            displaced = Some(owned.power_id);
        }
    }

    Ok(EquipChange { slot, displaced })
}

/// Clears the slot of `power_id`, returning the slot it occupied.
pub fn unequip(
    inventory: &mut [UserPower],
    power_id: PowerId,
) -> Result<Option<EquipSlot>, LoadoutError> {
    let owned = inventory
        .iter_mut()
        .find(|owned| owned.power_id == power_id)
        .ok_or(LoadoutError::NotOwned(power_id))?;
    Ok(owned.equipped_slot.take())
}
