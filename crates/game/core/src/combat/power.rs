//! Power effects layered on top of attack resolution.

use super::error::BattleError;
use super::resolve::{AttackReport, resolve_attack};
use crate::catalog::{PowerDefinition, PowerType};
use crate::config::GameConfig;
use crate::state::{Battle, Timestamp, UserId};

/// Effect produced by a single power use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "effect", rename_all = "snake_case"))]
pub enum PowerEffect {
    /// An attack power went through normal attack resolution.
    Attack(AttackReport),
    /// The user's shield window now ends at `until`.
    Shield { until: Timestamp, duration_secs: u32 },
    /// The user's counter window now ends at `until` and reflects `damage`.
    Counter { until: Timestamp, damage: i32 },
}

impl PowerEffect {
    /// Short human-readable summary for clients.
    pub fn message(&self) -> String {
        match self {
            Self::Attack(report) if report.is_blocked() => "Attack blocked by shield!".into(),
            Self::Attack(report) if report.is_countered() => "Attack countered!".into(),
            Self::Attack(_) => "Attack landed".into(),
            Self::Shield { duration_secs, .. } => format!("Shield active for {duration_secs}s"),
            Self::Counter { .. } => "Counter armed".into(),
        }
    }
}

/// Applies `power` on behalf of `user`.
///
/// Shield and counter windows overwrite any window already open on the same
/// side; they never stack. Cooldown bookkeeping is the caller's job and must
/// happen whatever branch ran here.
///
/// # Errors
///
/// - [`BattleError::NotActive`] if the battle already finished
/// - [`BattleError::NotParticipant`] if `user` is not in the battle
/// - [`BattleError::InvalidPowerType`] for an unknown power type
pub fn apply_power(
    battle: &mut Battle,
    user: UserId,
    power: &PowerDefinition,
    now: Timestamp,
    config: &GameConfig,
) -> Result<PowerEffect, BattleError> {
    BattleError::ensure_active(battle)?;
    let side = battle.side_of(user).ok_or(BattleError::NotParticipant {
        battle: battle.id,
        user,
    })?;

    match power.power_type {
        PowerType::Attack => {
            resolve_attack(battle, user, power.damage, now).map(PowerEffect::Attack)
        }
        PowerType::Defense => {
            let until = now.plus_secs(power.shield_duration);
            battle.combatant_mut(side).shield_until = until;
            Ok(PowerEffect::Shield {
                until,
                duration_secs: power.shield_duration,
            })
        }
        PowerType::Counter => {
            let until = now + config.counter_window_ms();
            let combatant = battle.combatant_mut(side);
            combatant.counter_until = until;
            combatant.counter_damage = power.damage;
            Ok(PowerEffect::Counter {
                until,
                damage: power.damage,
            })
        }
        PowerType::Unknown => Err(BattleError::InvalidPowerType(power.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::AttackOutcome;
    use crate::state::{BattleId, PowerId, RarityId};

    const P1: UserId = UserId(1);
    const P2: UserId = UserId(2);
    const NOW: Timestamp = Timestamp(10_000);

    fn battle() -> Battle {
        Battle::new(BattleId(3), P1, P2, 10, Timestamp::ZERO)
    }

    fn power(power_type: PowerType, damage: i32, shield_duration: u32) -> PowerDefinition {
        PowerDefinition {
            id: PowerId(11),
            name: "test".into(),
            rarity_id: RarityId(1),
            power_type,
            cooldown: 4,
            damage,
            shield_duration,
        }
    }

    #[test]
    fn defense_opens_shield_window() {
        let mut battle = battle();
        let effect = apply_power(
            &mut battle,
            P2,
            &power(PowerType::Defense, 0, 5),
            NOW,
            &GameConfig::default(),
        )
        .unwrap();

        assert_eq!(
            effect,
            PowerEffect::Shield {
                until: Timestamp(15_000),
                duration_secs: 5
            }
        );
        assert_eq!(battle.player2.shield_until, Timestamp(15_000));
        assert_eq!(effect.message(), "Shield active for 5s");
    }

    #[test]
    fn shield_overwrites_instead_of_stacking() {
        let mut battle = battle();
        battle.player1.shield_until = Timestamp(60_000);

        apply_power(
            &mut battle,
            P1,
            &power(PowerType::Defense, 0, 2),
            NOW,
            &GameConfig::default(),
        )
        .unwrap();

        assert_eq!(battle.player1.shield_until, Timestamp(12_000));
    }

    #[test]
    fn counter_arms_fixed_window_with_power_damage() {
        let mut battle = battle();
        apply_power(
            &mut battle,
            P2,
            &power(PowerType::Counter, 4, 0),
            NOW,
            &GameConfig::default(),
        )
        .unwrap();

        assert_eq!(battle.player2.counter_until, Timestamp(13_000));
        assert_eq!(battle.player2.counter_damage, 4);
    }

    #[test]
    fn attack_power_uses_its_damage() {
        let mut battle = battle();
        let effect = apply_power(
            &mut battle,
            P1,
            &power(PowerType::Attack, 6, 0),
            NOW,
            &GameConfig::default(),
        )
        .unwrap();

        match effect {
            PowerEffect::Attack(report) => {
                assert_eq!(report.outcome, AttackOutcome::Hit { damage: 6 });
                assert_eq!(report.player2_hp, 4);
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_rejected_without_mutation() {
        let mut battle = battle();
        let before = battle.clone();

        let err = apply_power(
            &mut battle,
            P1,
            &power(PowerType::Unknown, 3, 3),
            NOW,
            &GameConfig::default(),
        )
        .unwrap_err();

        assert_eq!(err, BattleError::InvalidPowerType(PowerId(11)));
        assert_eq!(battle, before);
    }

    #[test]
    fn outsider_cannot_arm_windows() {
        let mut battle = battle();
        let err = apply_power(
            &mut battle,
            UserId(42),
            &power(PowerType::Defense, 0, 5),
            NOW,
            &GameConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, BattleError::NotParticipant { .. }));
        assert_eq!(battle.player2.shield_until, Timestamp::ZERO);
    }
}
