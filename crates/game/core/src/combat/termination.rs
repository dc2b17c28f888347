use crate::state::{Battle, BattleStatus, UserId};

/// Winner and loser of a battle that just finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleEnd {
    pub winner: UserId,
    pub loser: UserId,
}

/// Finishes `battle` if either side has HP `<= 0`.
///
/// Player1 is checked first, so when both sides are down at once player1 is
/// the loser. That ordering is arbitrary but kept stable for replays.
///
/// Returns `None` (and leaves the battle untouched) while both sides stand or
/// when the battle was already finished.
pub fn check_termination(battle: &mut Battle) -> Option<BattleEnd> {
    if !battle.is_active() {
        return None;
    }

    let end = if battle.player1.is_defeated() {
        BattleEnd {
            winner: battle.player2.user_id,
            loser: battle.player1.user_id,
        }
    } else if battle.player2.is_defeated() {
        BattleEnd {
            winner: battle.player1.user_id,
            loser: battle.player2.user_id,
        }
    } else {
        return None;
    };

    battle.status = BattleStatus::Finished;
    battle.winner_id = Some(end.winner);
    Some(end)
}
