//! Matchmaker: pairs waiting players into battles.

use arena_core::UserId;
use arena_core::matchmaking::{QueueEntry, expiry_cutoff, select_opponent};
use tracing::{debug, info};

use super::{ServiceContext, require_user};
use crate::api::{
    BattleSummary, CancelSearchResponse, CheckMatchResponse, FindMatchResponse, Result,
};
use crate::repository::{RepositoryError, Transaction};

/// Pairs `player` with the oldest waiting opponent, or queues them.
///
/// Stale entries are swept first, unconditionally. A player who already sits
/// in an active battle gets that battle back instead of a second one.
pub fn find_match(
    tx: &mut dyn Transaction,
    ctx: &ServiceContext<'_>,
    player: UserId,
) -> Result<FindMatchResponse> {
    require_user(tx, player)?;

    let purged = tx.purge_queue_before(expiry_cutoff(ctx.now, ctx.config))?;
    if purged > 0 {
        debug!(purged, "expired matchmaking entries");
    }

    if let Some(battle) = tx.active_battle_for(player)? {
        tx.dequeue(player)?;
        let opponent = battle.opponent_of(player).ok_or_else(|| {
            RepositoryError::CorruptedData(format!("{} lost track of {player}", battle.id))
        })?;
        debug!(%player, battle = %battle.id, "player already in an active battle");
        return Ok(FindMatchResponse::matched(battle.id, opponent));
    }

    let entries = tx.queue_entries()?;
    let Some(opponent) = select_opponent(&entries, player).map(|entry| entry.player_id) else {
        let queued = tx.enqueue(QueueEntry::new(player, ctx.now))?;
        debug!(%player, queued, "no opponent waiting");
        return Ok(FindMatchResponse::searching());
    };

    tx.dequeue(player)?;
    tx.dequeue(opponent)?;
    let battle = tx.create_battle(player, opponent, ctx.config.starting_hp, ctx.now)?;

    info!(battle = %battle.id, player1 = %player, player2 = %opponent, "match created");
    Ok(FindMatchResponse::matched(battle.id, opponent))
}

/// Leaves the queue (no-op if absent) and pays the consolation reward.
pub fn cancel_search(
    tx: &mut dyn Transaction,
    ctx: &ServiceContext<'_>,
    player: UserId,
) -> Result<CancelSearchResponse> {
    let mut user = require_user(tx, player)?;

    let was_queued = tx.dequeue(player)?;
    user.money += ctx.config.cancel_search_reward;
    tx.save_user(&user)?;

    debug!(%player, was_queued, money = user.money, "search cancelled");
    Ok(CancelSearchResponse {
        reward: ctx.config.cancel_search_reward,
        money: user.money,
    })
}

/// Summary of the player's active battle, if any.
pub fn check_match(tx: &dyn Transaction, player: UserId) -> Result<CheckMatchResponse> {
    let battle = tx.active_battle_for(player)?;
    Ok(CheckMatchResponse {
        matched: battle.is_some(),
        battle: battle.as_ref().map(BattleSummary::from),
    })
}
