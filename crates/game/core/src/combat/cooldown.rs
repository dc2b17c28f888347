//! Per-battle power cooldown gate.
//!
//! A cooldown row exists per (battle, user, power) and stores the instant the
//! power becomes usable again. Rows never outlive their battle's relevance:
//! a new battle id starts with no cooldowns.

use super::error::BattleError;
use crate::catalog::PowerDefinition;
use crate::state::{BattleId, PowerId, Timestamp, UserId};

/// Unique key of a cooldown row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownKey {
    pub battle_id: BattleId,
    pub user_id: UserId,
    pub power_id: PowerId,
}

impl CooldownKey {
    pub fn new(battle_id: BattleId, user_id: UserId, power_id: PowerId) -> Self {
        Self {
            battle_id,
            user_id,
            power_id,
        }
    }
}

/// Fails with [`BattleError::OnCooldown`] while `now < can_use_at`.
///
/// A missing row means the power was never used in this battle.
pub fn ensure_ready(
    key: &CooldownKey,
    can_use_at: Option<Timestamp>,
    now: Timestamp,
) -> Result<(), BattleError> {
    match can_use_at {
        Some(ready_at) if now < ready_at => Err(BattleError::OnCooldown {
            power: key.power_id,
            remaining_ms: now.millis_until(ready_at),
        }),
        _ => Ok(()),
    }
}

/// Instant at which `power` may be used again after a use at `now`.
pub fn next_available(power: &PowerDefinition, now: Timestamp) -> Timestamp {
    now.plus_secs(power.cooldown)
}
