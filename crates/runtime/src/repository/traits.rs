//! Repository contracts for the mutable arena tables.
//!
//! Each trait covers one table. Services never hold a repository directly:
//! they receive a [`Transaction`] from [`ArenaStore::transaction`] so every
//! read and write of one request commits or rolls back together.

use arena_core::{
    Battle, BattleId, CooldownKey, PlayerRecord, QueueEntry, Timestamp, UserId, UserPower,
};

use super::error::{RepositoryError, Result};

/// User records owned by the external registration service.
pub trait UserRepository {
    fn user(&self, id: UserId) -> Result<Option<PlayerRecord>>;

    /// Overwrites the stored record with the same id.
    fn save_user(&mut self, user: &PlayerRecord) -> Result<()>;
}

/// Matchmaking queue, at most one entry per player.
pub trait QueueRepository {
    /// Deletes every entry that joined strictly before `cutoff`.
    ///
    /// Returns the number of purged entries.
    fn purge_queue_before(&mut self, cutoff: Timestamp) -> Result<usize>;

    fn queue_entries(&self) -> Result<Vec<QueueEntry>>;

    /// Inserts `entry` unless the player is already queued.
    ///
    /// Returns `false` when an entry already existed (insert-or-ignore).
    fn enqueue(&mut self, entry: QueueEntry) -> Result<bool>;

    /// Removes the player's entry. Returns `false` if none existed.
    fn dequeue(&mut self, player: UserId) -> Result<bool>;
}

/// Battle rows.
pub trait BattleRepository {
    /// Allocates an id and stores a new active battle.
    fn create_battle(
        &mut self,
        player1: UserId,
        player2: UserId,
        starting_hp: i32,
        now: Timestamp,
    ) -> Result<Battle>;

    fn battle(&self, id: BattleId) -> Result<Option<Battle>>;

    /// The active battle `user` takes part in, if any.
    fn active_battle_for(&self, user: UserId) -> Result<Option<Battle>>;

    /// Overwrites the stored battle with the same id.
    fn save_battle(&mut self, battle: &Battle) -> Result<()>;
}

/// Per-(battle, user, power) cooldown rows.
pub trait CooldownRepository {
    fn cooldown(&self, key: &CooldownKey) -> Result<Option<Timestamp>>;

    /// Insert-or-update keyed on the full (battle, user, power) triple.
    fn upsert_cooldown(&mut self, key: CooldownKey, can_use_at: Timestamp) -> Result<()>;

    /// Deletes every row of `battle`. Returns the number of deleted rows.
    fn clear_cooldowns(&mut self, battle: BattleId) -> Result<usize>;
}

/// Owned powers and their equip slots.
pub trait InventoryRepository {
    fn inventory(&self, user: UserId) -> Result<Vec<UserPower>>;

    /// Adds the power unless the user already owns it.
    ///
    /// Returns `false` for a duplicate (insert-or-ignore).
    fn grant_power(&mut self, grant: UserPower) -> Result<bool>;

    /// Persists the equip slots of `powers`, all belonging to `user`.
    fn save_loadout(&mut self, user: UserId, powers: &[UserPower]) -> Result<()>;
}

/// Everything a service may touch inside one unit of work.
pub trait Transaction:
    UserRepository + QueueRepository + BattleRepository + CooldownRepository + InventoryRepository
{
}

impl<T> Transaction for T where
    T: UserRepository
        + QueueRepository
        + BattleRepository
        + CooldownRepository
        + InventoryRepository
{
}

/// Transactional store behind the arena.
///
/// Implementations must guarantee that:
/// - writes made inside `f` become visible only if `f` returns `Ok`
/// - concurrent transactions touching the same rows are serialized
pub trait ArenaStore: Send + Sync {
    /// Runs `f` as one unit of work, committing on `Ok` and rolling back on `Err`.
    fn transaction<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut dyn Transaction) -> std::result::Result<T, E>,
        E: From<RepositoryError>;
}
