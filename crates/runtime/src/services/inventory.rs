//! Spins, inventory listing and loadout changes.

use std::cmp::Reverse;

use arena_core::loadout::{self, EquipSlot};
use arena_core::spin::draw;
use arena_core::{PowerCatalog, PowerId, UserId, UserPower};
use tracing::{debug, info};

use super::{ServiceContext, require_user};
use crate::api::{
    CatalogEntry, CatalogResponse, EquipResponse, InventoryEntry, InventoryResponse, Result,
    RuntimeError, SpinResponse, UnequipResponse, UserStatsResponse,
};
use crate::repository::Transaction;

/// Spends one spin token and grants the power picked by `roll`.
///
/// Owning the drawn power already still consumes the token.
pub fn spin(
    tx: &mut dyn Transaction,
    ctx: &ServiceContext<'_>,
    user_id: UserId,
    roll: f64,
) -> Result<SpinResponse> {
    let mut user = require_user(tx, user_id)?;
    if !user.take_spin() {
        return Err(RuntimeError::NotEnoughSpins(user_id));
    }

    let table = ctx.catalog.spin_table();
    let drawn = draw(&table, roll).ok_or(RuntimeError::EmptyCatalog)?;

    tx.save_user(&user)?;
    let newly_obtained = tx.grant_power(UserPower::new(user_id, drawn.power.id, ctx.now))?;

    info!(
        user = %user_id,
        power = %drawn.power.id,
        rarity = %drawn.rarity_name,
        roll,
        newly_obtained,
        "spin resolved"
    );
    Ok(SpinResponse {
        power: CatalogEntry::from(drawn),
        newly_obtained,
        spins_left: user.spins,
    })
}

/// Equips an owned power into `slot`, displacing the current occupant.
pub fn equip_power(
    tx: &mut dyn Transaction,
    user_id: UserId,
    power_id: PowerId,
    slot: u8,
) -> Result<EquipResponse> {
    let slot = EquipSlot::try_from(slot)?;
    require_user(tx, user_id)?;

    let mut powers = tx.inventory(user_id)?;
    let change = loadout::equip(&mut powers, power_id, slot)?;
    tx.save_loadout(user_id, &powers)?;

    debug!(
        user = %user_id,
        power = %power_id,
        slot = slot.get(),
        displaced = ?change.displaced,
        "power equipped"
    );
    Ok(EquipResponse {
        power_id,
        slot: change.slot,
        displaced: change.displaced,
    })
}

pub fn unequip_power(
    tx: &mut dyn Transaction,
    user_id: UserId,
    power_id: PowerId,
) -> Result<UnequipResponse> {
    require_user(tx, user_id)?;

    let mut powers = tx.inventory(user_id)?;
    let slot = loadout::unequip(&mut powers, power_id)?;
    tx.save_loadout(user_id, &powers)?;

    debug!(user = %user_id, power = %power_id, ?slot, "power unequipped");
    Ok(UnequipResponse { power_id, slot })
}

/// Owned powers, newest first.
pub fn inventory(
    tx: &dyn Transaction,
    ctx: &ServiceContext<'_>,
    user_id: UserId,
) -> Result<InventoryResponse> {
    require_user(tx, user_id)?;

    let mut owned = tx.inventory(user_id)?;
    owned.sort_by_key(|power| (Reverse(power.obtained_at), Reverse(power.power_id)));

    let powers = owned
        .iter()
        .map(|power| InventoryEntry::new(power, ctx.catalog.power(power.power_id).as_ref()))
        .collect();
    Ok(InventoryResponse { powers })
}

pub fn user_stats(tx: &dyn Transaction, user_id: UserId) -> Result<UserStatsResponse> {
    let user = require_user(tx, user_id)?;
    Ok(UserStatsResponse::from(&user))
}

/// Every power with its rarity, in spin order.
pub fn catalog(catalog: &dyn PowerCatalog) -> CatalogResponse {
    let powers = catalog.spin_table().iter().map(CatalogEntry::from).collect();
    CatalogResponse { powers }
}
