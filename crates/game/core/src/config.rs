/// Game rule constants and tunable parameters.
///
/// Every numeric rule of the arena lives here so deployments can override them
/// from a TOML file without touching the resolution code.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// HP both combatants start a battle with.
    pub starting_hp: i32,
    /// Damage dealt by the plain `attack` action (no power involved).
    pub basic_attack_damage: i32,
    /// Length of the counter window opened by a counter power.
    pub counter_window_secs: u32,
    /// Queue entries older than this are swept on the next matchmaking request.
    pub queue_expiry_secs: u32,
    /// Currency granted to the winner of a battle.
    pub win_money_reward: i64,
    /// Spin tokens granted to the winner of a battle.
    pub win_spin_reward: u32,
    /// Consolation currency granted when a player cancels a search.
    pub cancel_search_reward: i64,
}

impl GameConfig {
    pub const DEFAULT_STARTING_HP: i32 = 10;
    pub const DEFAULT_BASIC_ATTACK_DAMAGE: i32 = 2;
    pub const DEFAULT_COUNTER_WINDOW_SECS: u32 = 3;
    pub const DEFAULT_QUEUE_EXPIRY_SECS: u32 = 25;
    pub const DEFAULT_WIN_MONEY_REWARD: i64 = 100;
    pub const DEFAULT_WIN_SPIN_REWARD: u32 = 1;
    pub const DEFAULT_CANCEL_SEARCH_REWARD: i64 = 10;

    pub fn new() -> Self {
        Self {
            starting_hp: Self::DEFAULT_STARTING_HP,
            basic_attack_damage: Self::DEFAULT_BASIC_ATTACK_DAMAGE,
            counter_window_secs: Self::DEFAULT_COUNTER_WINDOW_SECS,
            queue_expiry_secs: Self::DEFAULT_QUEUE_EXPIRY_SECS,
            win_money_reward: Self::DEFAULT_WIN_MONEY_REWARD,
            win_spin_reward: Self::DEFAULT_WIN_SPIN_REWARD,
            cancel_search_reward: Self::DEFAULT_CANCEL_SEARCH_REWARD,
        }
    }

    /// Counter window expressed in milliseconds.
    pub fn counter_window_ms(&self) -> u64 {
        u64::from(self.counter_window_secs) * 1000
    }

    /// Queue expiry expressed in milliseconds.
    pub fn queue_expiry_ms(&self) -> u64 {
        u64::from(self.queue_expiry_secs) * 1000
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
