use super::{BattleId, Timestamp, UserId};

/// Lifecycle of a battle. Transitions only `Active -> Finished`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BattleStatus {
    Active,
    Finished,
}

/// Seat of a participant inside a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Player1 => Self::Player2,
            Self::Player2 => Self::Player1,
        }
    }
}

/// One participant's battle-scoped state: HP plus the two timed effect windows.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub user_id: UserId,
    /// May go negative after a lethal hit; `<= 0` means defeated.
    pub hp: i32,
    pub shield_until: Timestamp,
    pub counter_until: Timestamp,
    pub counter_damage: i32,
}

impl Combatant {
    pub fn new(user_id: UserId, hp: i32) -> Self {
        Self {
            user_id,
            hp,
            shield_until: Timestamp::ZERO,
            counter_until: Timestamp::ZERO,
            counter_damage: 0,
        }
    }

    pub fn is_shielded(&self, now: Timestamp) -> bool {
        now < self.shield_until
    }

    pub fn has_counter_ready(&self, now: Timestamp) -> bool {
        now < self.counter_until
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }
}

/// A two-player HP duel.
///
/// Created by the matchmaker, mutated only by the battle rules, and frozen
/// once `status` becomes [`BattleStatus::Finished`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Battle {
    pub id: BattleId,
    pub player1: Combatant,
    pub player2: Combatant,
    pub status: BattleStatus,
    pub winner_id: Option<UserId>,
    pub created_at: Timestamp,
}

impl Battle {
    /// Opens an active battle with both sides at `starting_hp`.
    pub fn new(
        id: BattleId,
        player1: UserId,
        player2: UserId,
        starting_hp: i32,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            player1: Combatant::new(player1, starting_hp),
            player2: Combatant::new(player2, starting_hp),
            status: BattleStatus::Active,
            winner_id: None,
            created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BattleStatus::Active
    }

    /// Seat occupied by `user`, or `None` for spectators.
    pub fn side_of(&self, user: UserId) -> Option<Side> {
        if self.player1.user_id == user {
            Some(Side::Player1)
        } else if self.player2.user_id == user {
            Some(Side::Player2)
        } else {
            None
        }
    }

    pub fn involves(&self, user: UserId) -> bool {
        self.side_of(user).is_some()
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player1 => &self.player1,
            Side::Player2 => &self.player2,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player1 => &mut self.player1,
            Side::Player2 => &mut self.player2,
        }
    }

    /// The other participant's id, if `user` is in this battle.
    pub fn opponent_of(&self, user: UserId) -> Option<UserId> {
        self.side_of(user)
            .map(|side| self.combatant(side.opponent()).user_id)
    }

    pub fn hp_pair(&self) -> (i32, i32) {
        (self.player1.hp, self.player2.hp)
    }
}
