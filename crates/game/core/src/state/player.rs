use super::UserId;
use crate::config::GameConfig;

/// Persistent per-user record the arena reads and updates.
///
/// HP is never stored here; it lives on the battle. Registration (external)
/// creates the row, and only battle termination, search cancellation, and
/// spins mutate it afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRecord {
    pub id: UserId,
    pub nick: String,
    pub money: i64,
    pub spins: u32,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerRecord {
    /// Fresh account with empty balances, as registration creates it.
    pub fn new(id: UserId, nick: impl Into<String>) -> Self {
        Self {
            id,
            nick: nick.into(),
            money: 0,
            spins: 0,
            wins: 0,
            losses: 0,
        }
    }

    #[must_use]
    pub fn with_money(mut self, money: i64) -> Self {
        self.money = money;
        self
    }

    #[must_use]
    pub fn with_spins(mut self, spins: u32) -> Self {
        self.spins = spins;
        self
    }

    /// Credits a victory: one win plus the configured currency and spin bonus.
    pub fn record_win(&mut self, config: &GameConfig) {
        self.wins += 1;
        self.money += config.win_money_reward;
        self.spins += config.win_spin_reward;
    }

    pub fn record_loss(&mut self) {
        self.losses += 1;
    }

    /// Consumes one spin token. Returns false (and changes nothing) when none are left.
    pub fn take_spin(&mut self) -> bool {
        if self.spins == 0 {
            return false;
        }
        self.spins -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_awards_money_and_spin() {
        let config = GameConfig::default();
        let mut player = PlayerRecord::new(UserId(1), "alice");

        player.record_win(&config);

        assert_eq!(player.wins, 1);
        assert_eq!(player.money, 100);
        assert_eq!(player.spins, 1);
        assert_eq!(player.losses, 0);
    }

    #[test]
    fn take_spin_refuses_at_zero() {
        let mut player = PlayerRecord::new(UserId(1), "alice");
        assert!(!player.take_spin());
        assert_eq!(player.spins, 0);

        let mut player = player.with_spins(1);
        assert!(player.take_spin());
        assert_eq!(player.spins, 0);
    }
}
