//! Cooldown tracker: per (battle, user, power) reuse gate backed by the store.

use arena_core::combat::cooldown::{self, CooldownKey};
use arena_core::{PowerDefinition, Timestamp};

use crate::api::Result;
use crate::repository::Transaction;

/// Fails with `OnCooldown` while the stored `can_use_at` lies in the future.
pub fn ensure_ready(tx: &dyn Transaction, key: &CooldownKey, now: Timestamp) -> Result<()> {
    let can_use_at = tx.cooldown(key)?;
    cooldown::ensure_ready(key, can_use_at, now)?;
    Ok(())
}

/// Records a use of `power` at `now` and returns when it is usable again.
pub fn record_use(
    tx: &mut dyn Transaction,
    key: CooldownKey,
    power: &PowerDefinition,
    now: Timestamp,
) -> Result<Timestamp> {
    let can_use_at = cooldown::next_available(power, now);
    tx.upsert_cooldown(key, can_use_at)?;
    Ok(can_use_at)
}
