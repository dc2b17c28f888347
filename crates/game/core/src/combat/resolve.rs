//! Attack resolution: shield, then counter, then a normal hit.

use super::error::BattleError;
use super::termination::{BattleEnd, check_termination};
use crate::state::{Battle, Timestamp, UserId};

/// What happened to an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AttackOutcome {
    /// The defender's shield absorbed the attack; no HP changed.
    Blocked,
    /// The defender's counter fired; the attacker took `damage_taken`.
    Countered { damage_taken: i32 },
    /// The defender took `damage`.
    Hit { damage: i32 },
}

/// Outcome of [`resolve_attack`] with the post-resolution HP pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackReport {
    pub outcome: AttackOutcome,
    pub player1_hp: i32,
    pub player2_hp: i32,
    /// Set when this attack finished the battle.
    pub end: Option<BattleEnd>,
}

impl AttackReport {
    pub fn is_blocked(&self) -> bool {
        matches!(self.outcome, AttackOutcome::Blocked)
    }

    pub fn is_countered(&self) -> bool {
        matches!(self.outcome, AttackOutcome::Countered { .. })
    }

    pub fn finished(&self) -> bool {
        self.end.is_some()
    }

    pub fn winner(&self) -> Option<UserId> {
        self.end.map(|end| end.winner)
    }
}

/// Resolves `attacker` striking the other participant for `damage`.
///
/// # Resolution order
///
/// 1. Defender shielded (`now < shield_until`): blocked, nothing changes.
/// 2. Defender counter armed (`now < counter_until`): the attacker loses the
///    stored `counter_damage` and the counter window is consumed.
/// 3. Otherwise the defender loses `damage`. HP is not floored at zero.
///
/// Any HP change is followed by [`check_termination`].
///
/// # Errors
///
/// - [`BattleError::NotActive`] if the battle already finished
/// - [`BattleError::NotParticipant`] if `attacker` is not in the battle
pub fn resolve_attack(
    battle: &mut Battle,
    attacker: UserId,
    damage: i32,
    now: Timestamp,
) -> Result<AttackReport, BattleError> {
    BattleError::ensure_active(battle)?;
    let attacker_side = battle
        .side_of(attacker)
        .ok_or(BattleError::NotParticipant {
            battle: battle.id,
            user: attacker,
        })?;
    let defender_side = attacker_side.opponent();

    let defender = battle.combatant(defender_side);
    let outcome = if defender.is_shielded(now) {
        AttackOutcome::Blocked
    } else if defender.has_counter_ready(now) {
        let damage_taken = defender.counter_damage;
        battle.combatant_mut(defender_side).counter_until = Timestamp::ZERO;
        battle.combatant_mut(attacker_side).hp -= damage_taken;
        AttackOutcome::Countered { damage_taken }
    } else {
        battle.combatant_mut(defender_side).hp -= damage;
        AttackOutcome::Hit { damage }
    };

    let end = match outcome {
        AttackOutcome::Blocked => None,
        _ => check_termination(battle),
    };

    Ok(AttackReport {
        outcome,
        player1_hp: battle.player1.hp,
        player2_hp: battle.player2.hp,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BattleId, BattleStatus};

    const P1: UserId = UserId(1);
    const P2: UserId = UserId(2);

    fn battle() -> Battle {
        Battle::new(BattleId(7), P1, P2, 10, Timestamp::ZERO)
    }

    #[test]
    fn normal_hit_reduces_defender() {
        let mut battle = battle();
        let report = resolve_attack(&mut battle, P1, 2, Timestamp(1_000)).unwrap();

        assert_eq!(report.outcome, AttackOutcome::Hit { damage: 2 });
        assert_eq!((report.player1_hp, report.player2_hp), (10, 8));
        assert!(!report.finished());
    }

    #[test]
    fn five_hits_of_two_finish_the_battle() {
        let mut battle = battle();
        let mut last = None;
        for i in 0..5 {
            last = Some(resolve_attack(&mut battle, P1, 2, Timestamp(i * 1_000)).unwrap());
        }
        let report = last.unwrap();

        assert_eq!(report.player2_hp, 0);
        assert_eq!(report.winner(), Some(P1));
        assert_eq!(battle.status, BattleStatus::Finished);
    }

    #[test]
    fn shield_blocks_without_hp_change() {
        let mut battle = battle();
        battle.player2.shield_until = Timestamp(5_000);

        let report = resolve_attack(&mut battle, P1, 2, Timestamp(1_000)).unwrap();

        assert!(report.is_blocked());
        assert_eq!(battle.hp_pair(), (10, 10));
    }

    #[test]
    fn shield_takes_priority_over_counter() {
        let mut battle = battle();
        battle.player2.shield_until = Timestamp(5_000);
        battle.player2.counter_until = Timestamp(5_000);
        battle.player2.counter_damage = 4;

        let report = resolve_attack(&mut battle, P1, 2, Timestamp(1_000)).unwrap();

        assert!(report.is_blocked());
        assert_eq!(battle.player2.counter_until, Timestamp(5_000));
    }

    #[test]
    fn counter_reflects_once() {
        let mut battle = battle();
        battle.player2.counter_until = Timestamp(4_000);
        battle.player2.counter_damage = 4;

        let first = resolve_attack(&mut battle, P1, 2, Timestamp(1_000)).unwrap();
        assert_eq!(first.outcome, AttackOutcome::Countered { damage_taken: 4 });
        assert_eq!(battle.hp_pair(), (6, 10));
        assert_eq!(battle.player2.counter_until, Timestamp::ZERO);

        let second = resolve_attack(&mut battle, P1, 2, Timestamp(1_500)).unwrap();
        assert_eq!(second.outcome, AttackOutcome::Hit { damage: 2 });
        assert_eq!(battle.hp_pair(), (6, 8));
    }

    #[test]
    fn expired_windows_are_ignored() {
        let mut battle = battle();
        battle.player1.shield_until = Timestamp(1_000);
        battle.player1.counter_until = Timestamp(1_000);
        battle.player1.counter_damage = 9;

        let report = resolve_attack(&mut battle, P2, 3, Timestamp(1_000)).unwrap();
        assert_eq!(report.outcome, AttackOutcome::Hit { damage: 3 });
        assert_eq!(battle.hp_pair(), (7, 10));
    }

    #[test]
    fn lethal_counter_defeats_attacker() {
        let mut battle = battle();
        battle.player1.hp = 3;
        battle.player2.counter_until = Timestamp(4_000);
        battle.player2.counter_damage = 4;

        let report = resolve_attack(&mut battle, P1, 2, Timestamp(1_000)).unwrap();

        assert_eq!(report.player1_hp, -1);
        assert_eq!(report.winner(), Some(P2));
    }

    #[test]
    fn outsiders_are_forbidden() {
        let mut battle = battle();
        let err = resolve_attack(&mut battle, UserId(99), 2, Timestamp(0)).unwrap_err();
        assert_eq!(
            err,
            BattleError::NotParticipant {
                battle: BattleId(7),
                user: UserId(99)
            }
        );
    }

    #[test]
    fn finished_battle_rejects_attacks_and_stays_frozen() {
        let mut battle = battle();
        battle.player2.hp = 2;
        resolve_attack(&mut battle, P1, 2, Timestamp(0)).unwrap();
        let frozen = battle.clone();

        let err = resolve_attack(&mut battle, P2, 2, Timestamp(10)).unwrap_err();

        assert_eq!(err, BattleError::NotActive(BattleId(7)));
        assert_eq!(battle, frozen);
    }
}
