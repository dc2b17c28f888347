//! Battle engine: attacks, power uses and end-of-battle settlement.

use arena_core::{
    Battle, BattleEnd, BattleError, BattleId, CooldownKey, PowerEffect, PowerId, UserId,
    apply_power, resolve_attack,
};
use tracing::{debug, info, warn};

use super::{ServiceContext, cooldown};
use crate::api::{AttackResponse, BattleStateResponse, Result, RuntimeError, UsePowerResponse};
use crate::repository::Transaction;

/// Basic attack for the configured damage.
pub fn attack(
    tx: &mut dyn Transaction,
    ctx: &ServiceContext<'_>,
    battle_id: BattleId,
    attacker: UserId,
) -> Result<AttackResponse> {
    let mut battle = load_for_action(tx, battle_id)?;
    let report = resolve_attack(
        &mut battle,
        attacker,
        ctx.config.basic_attack_damage,
        ctx.now,
    )?;
    debug!(battle = %battle_id, %attacker, outcome = ?report.outcome, "attack resolved");

    persist(tx, ctx, &battle, report.end)?;
    Ok(AttackResponse::from(&report))
}

/// Uses `power_id` on behalf of `user`.
///
/// Checks run in a fixed order: cooldown, power lookup, battle state, then
/// participation and power type. The cooldown row is written after every
/// successful effect, blocked attacks included.
pub fn use_power(
    tx: &mut dyn Transaction,
    ctx: &ServiceContext<'_>,
    battle_id: BattleId,
    user: UserId,
    power_id: PowerId,
) -> Result<UsePowerResponse> {
    let key = CooldownKey::new(battle_id, user, power_id);
    cooldown::ensure_ready(tx, &key, ctx.now)?;

    let power = ctx
        .catalog
        .power(power_id)
        .ok_or(RuntimeError::PowerNotFound(power_id))?;
    let mut battle = load_for_action(tx, battle_id)?;

    let effect = apply_power(&mut battle, user, &power, ctx.now, ctx.config)?;
    debug!(battle = %battle_id, %user, power = %power_id, ?effect, "power applied");

    let end = match effect {
        PowerEffect::Attack(report) => report.end,
        PowerEffect::Shield { .. } | PowerEffect::Counter { .. } => None,
    };
    let can_use_at = cooldown::record_use(tx, key, &power, ctx.now)?;
    persist(tx, ctx, &battle, end)?;

    Ok(UsePowerResponse {
        power_id,
        power_type: power.power_type,
        message: effect.message(),
        can_use_at,
        effect: (&effect).into(),
    })
}

/// Full battle row; `BattleNotFound` if it never existed.
pub fn battle_state(tx: &dyn Transaction, battle_id: BattleId) -> Result<BattleStateResponse> {
    let battle = tx
        .battle(battle_id)?
        .ok_or(RuntimeError::BattleNotFound(battle_id))?;
    Ok(BattleStateResponse::from(&battle))
}

/// Missing battles are reported like finished ones: the action is refused
/// because nothing active exists under that id.
fn load_for_action(tx: &dyn Transaction, battle_id: BattleId) -> Result<Battle> {
    let battle = tx
        .battle(battle_id)?
        .ok_or(BattleError::NotActive(battle_id))?;
    Ok(battle)
}

fn persist(
    tx: &mut dyn Transaction,
    ctx: &ServiceContext<'_>,
    battle: &Battle,
    end: Option<BattleEnd>,
) -> Result<()> {
    tx.save_battle(battle)?;
    if let Some(end) = end {
        settle(tx, ctx, battle.id, end)?;
    }
    Ok(())
}

/// Pays the winner, records the loss and drops the battle's cooldown rows.
fn settle(
    tx: &mut dyn Transaction,
    ctx: &ServiceContext<'_>,
    battle_id: BattleId,
    end: BattleEnd,
) -> Result<()> {
    match tx.user(end.winner)? {
        Some(mut winner) => {
            winner.record_win(ctx.config);
            tx.save_user(&winner)?;
        }
        None => warn!(battle = %battle_id, winner = %end.winner, "winner has no user record"),
    }
    match tx.user(end.loser)? {
        Some(mut loser) => {
            loser.record_loss();
            tx.save_user(&loser)?;
        }
        None => warn!(battle = %battle_id, loser = %end.loser, "loser has no user record"),
    }

    let cleared = tx.clear_cooldowns(battle_id)?;
    info!(
        battle = %battle_id,
        winner = %end.winner,
        loser = %end.loser,
        cleared_cooldowns = cleared,
        "battle finished"
    );
    Ok(())
}
