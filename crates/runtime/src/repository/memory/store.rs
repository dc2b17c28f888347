//! In-memory [`ArenaStore`] for tests and single-process deployments.

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::Mutex;

use arena_core::{
    Battle, BattleId, CooldownKey, EquipSlot, PlayerRecord, PowerId, QueueEntry, Timestamp,
    UserId, UserPower,
};

use crate::repository::{
    ArenaStore, BattleRepository, CooldownRepository, InventoryRepository, QueueRepository,
    RepositoryError, Result, Transaction, UserRepository,
};

/// Every arena table.
#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, PlayerRecord>,
    queue: HashMap<UserId, QueueEntry>,
    battles: BTreeMap<BattleId, Battle>,
    next_battle_id: i64,
    /// Index of the active battle each player sits in.
    active: HashMap<UserId, BattleId>,
    /// Ordered by battle first, so one battle's rows form a contiguous range.
    cooldowns: BTreeMap<CooldownKey, Timestamp>,
    inventories: HashMap<UserId, Vec<UserPower>>,
}

/// Prior value of one written row.
#[derive(Debug)]
enum Undo {
    User(UserId, Option<PlayerRecord>),
    Queue(UserId, Option<QueueEntry>),
    Battle(BattleId, Option<Battle>),
    NextBattleId(i64),
    Active(UserId, Option<BattleId>),
    Cooldown(CooldownKey, Option<Timestamp>),
    Inventory(UserId, Option<Vec<UserPower>>),
}

impl Tables {
    fn revert(&mut self, undo: Undo) {
        match undo {
            Undo::User(id, prior) => restore(&mut self.users, id, prior),
            Undo::Queue(id, prior) => restore(&mut self.queue, id, prior),
            Undo::Battle(id, prior) => match prior {
                Some(battle) => {
                    self.battles.insert(id, battle);
                }
                None => {
                    self.battles.remove(&id);
                }
            },
            Undo::NextBattleId(next) => self.next_battle_id = next,
            Undo::Active(id, prior) => restore(&mut self.active, id, prior),
            Undo::Cooldown(key, prior) => match prior {
                Some(can_use_at) => {
                    self.cooldowns.insert(key, can_use_at);
                }
                None => {
                    self.cooldowns.remove(&key);
                }
            },
            Undo::Inventory(id, prior) => restore(&mut self.inventories, id, prior),
        }
    }
}

fn restore<K: Eq + Hash, V>(map: &mut HashMap<K, V>, key: K, prior: Option<V>) {
    match prior {
        Some(value) => {
            map.insert(key, value);
        }
        None => {
            map.remove(&key);
        }
    }
}

/// Mutex-guarded tables with undo-log transactions.
///
/// Writes land on the live tables and log the row they replaced. A unit of
/// work that does not commit (error or panic) is reverted from the log, so
/// reads never copy and a write costs only the rows it touches. Transactions
/// are fully serialized on the table mutex.
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables {
                next_battle_id: 1,
                ..Tables::default()
            }),
        }
    }

    /// Create a store pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = PlayerRecord>) -> Self {
        let store = Self::new();
        if let Ok(mut tables) = store.tables.lock() {
            for user in users {
                tables.users.insert(user.id, user);
            }
        }
        store
    }

    /// Registers or replaces a user outside of any transaction.
    ///
    /// Stands in for the external registration service.
    pub fn insert_user(&self, user: PlayerRecord) -> Result<()> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        tables.users.insert(user.id, user);
        Ok(())
    }

    /// Number of queued players, for diagnostics.
    pub fn queue_len(&self) -> Result<usize> {
        let tables = self
            .tables
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(tables.queue.len())
    }

    /// Number of stored cooldown rows, for diagnostics.
    pub fn cooldown_len(&self) -> Result<usize> {
        let tables = self
            .tables
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(tables.cooldowns.len())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaStore for InMemoryStore {
    fn transaction<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut dyn Transaction) -> std::result::Result<T, E>,
        E: From<RepositoryError>,
    {
        let mut live = self
            .tables
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut staged = Staged::new(&mut live);
        let value = f(&mut staged)?;
        staged.commit();
        Ok(value)
    }
}

/// One unit of work over the live tables.
///
/// Dropping it without [`Staged::commit`] replays the undo log backwards.
struct Staged<'a> {
    tables: &'a mut Tables,
    undo: Vec<Undo>,
    committed: bool,
}

impl<'a> Staged<'a> {
    fn new(tables: &'a mut Tables) -> Self {
        Self {
            tables,
            undo: Vec::new(),
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
        self.undo.clear();
    }
}

impl Drop for Staged<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        while let Some(entry) = self.undo.pop() {
            self.tables.revert(entry);
        }
    }
}

impl UserRepository for Staged<'_> {
    fn user(&self, id: UserId) -> Result<Option<PlayerRecord>> {
        Ok(self.tables.users.get(&id).cloned())
    }

    fn save_user(&mut self, user: &PlayerRecord) -> Result<()> {
        let prior = self.tables.users.insert(user.id, user.clone());
        self.undo.push(Undo::User(user.id, prior));
        Ok(())
    }
}

impl QueueRepository for Staged<'_> {
    fn purge_queue_before(&mut self, cutoff: Timestamp) -> Result<usize> {
        let stale: Vec<UserId> = self
            .tables
            .queue
            .values()
            .filter(|entry| entry.joined_at < cutoff)
            .map(|entry| entry.player_id)
            .collect();
        for player in &stale {
            let prior = self.tables.queue.remove(player);
            self.undo.push(Undo::Queue(*player, prior));
        }
        Ok(stale.len())
    }

    fn queue_entries(&self) -> Result<Vec<QueueEntry>> {
        let mut entries: Vec<QueueEntry> = self.tables.queue.values().copied().collect();
        entries.sort_by_key(|entry| (entry.joined_at, entry.player_id));
        Ok(entries)
    }

    fn enqueue(&mut self, entry: QueueEntry) -> Result<bool> {
        if self.tables.queue.contains_key(&entry.player_id) {
            return Ok(false);
        }
        self.tables.queue.insert(entry.player_id, entry);
        self.undo.push(Undo::Queue(entry.player_id, None));
        Ok(true)
    }

    fn dequeue(&mut self, player: UserId) -> Result<bool> {
        let prior = self.tables.queue.remove(&player);
        let removed = prior.is_some();
        if removed {
            self.undo.push(Undo::Queue(player, prior));
        }
        Ok(removed)
    }
}

impl Staged<'_> {
    fn set_active(&mut self, user: UserId, battle: Option<BattleId>) {
        let prior = match battle {
            Some(id) => self.tables.active.insert(user, id),
            None => self.tables.active.remove(&user),
        };
        self.undo.push(Undo::Active(user, prior));
    }
}

impl BattleRepository for Staged<'_> {
    fn create_battle(
        &mut self,
        player1: UserId,
        player2: UserId,
        starting_hp: i32,
        now: Timestamp,
    ) -> Result<Battle> {
        let id = BattleId(self.tables.next_battle_id);
        if self.tables.battles.contains_key(&id) {
            return Err(RepositoryError::Conflict(format!("{id} already exists")));
        }
        self.undo.push(Undo::NextBattleId(self.tables.next_battle_id));
        self.tables.next_battle_id += 1;

        let battle = Battle::new(id, player1, player2, starting_hp, now);
        self.tables.battles.insert(id, battle.clone());
        self.undo.push(Undo::Battle(id, None));
        self.set_active(player1, Some(id));
        self.set_active(player2, Some(id));
        Ok(battle)
    }

    fn battle(&self, id: BattleId) -> Result<Option<Battle>> {
        Ok(self.tables.battles.get(&id).cloned())
    }

    fn active_battle_for(&self, user: UserId) -> Result<Option<Battle>> {
        Ok(self
            .tables
            .active
            .get(&user)
            .and_then(|id| self.tables.battles.get(id))
            .filter(|battle| battle.is_active())
            .cloned())
    }

    fn save_battle(&mut self, battle: &Battle) -> Result<()> {
        let Some(stored) = self.tables.battles.get_mut(&battle.id) else {
            return Err(RepositoryError::CorruptedData(format!(
                "{} was never created",
                battle.id
            )));
        };
        let prior = std::mem::replace(stored, battle.clone());
        self.undo.push(Undo::Battle(battle.id, Some(prior)));

        if !battle.is_active() {
            for user in [battle.player1.user_id, battle.player2.user_id] {
                if self.tables.active.get(&user) == Some(&battle.id) {
                    self.set_active(user, None);
                }
            }
        }
        Ok(())
    }
}

impl CooldownRepository for Staged<'_> {
    fn cooldown(&self, key: &CooldownKey) -> Result<Option<Timestamp>> {
        Ok(self.tables.cooldowns.get(key).copied())
    }

    fn upsert_cooldown(&mut self, key: CooldownKey, can_use_at: Timestamp) -> Result<()> {
        let prior = self.tables.cooldowns.insert(key, can_use_at);
        self.undo.push(Undo::Cooldown(key, prior));
        Ok(())
    }

    fn clear_cooldowns(&mut self, battle: BattleId) -> Result<usize> {
        let first = CooldownKey::new(battle, UserId(i64::MIN), PowerId(i64::MIN));
        let rows: Vec<CooldownKey> = self
            .tables
            .cooldowns
            .range(first..)
            .take_while(|(key, _)| key.battle_id == battle)
            .map(|(key, _)| *key)
            .collect();
        for key in &rows {
            let prior = self.tables.cooldowns.remove(key);
            self.undo.push(Undo::Cooldown(*key, prior));
        }
        Ok(rows.len())
    }
}

impl InventoryRepository for Staged<'_> {
    fn inventory(&self, user: UserId) -> Result<Vec<UserPower>> {
        Ok(self.tables.inventories.get(&user).cloned().unwrap_or_default())
    }

    fn grant_power(&mut self, grant: UserPower) -> Result<bool> {
        let prior = self.tables.inventories.get(&grant.user_id).cloned();
        if prior
            .iter()
            .flatten()
            .any(|power| power.power_id == grant.power_id)
        {
            return Ok(false);
        }
        self.undo.push(Undo::Inventory(grant.user_id, prior));
        self.tables
            .inventories
            .entry(grant.user_id)
            .or_default()
            .push(grant);
        Ok(true)
    }

    fn save_loadout(&mut self, user: UserId, powers: &[UserPower]) -> Result<()> {
        let mut taken: Vec<EquipSlot> = Vec::with_capacity(EquipSlot::COUNT as usize);
        for slot in powers.iter().filter_map(|power| power.equipped_slot) {
            if taken.contains(&slot) {
                return Err(RepositoryError::Conflict(format!(
                    "slot {} of {user} holds more than one power",
                    slot.get()
                )));
            }
            taken.push(slot);
        }

        let prior = self.tables.inventories.get(&user).cloned();
        let mut owned = prior.clone().unwrap_or_default();
        for update in powers {
            if update.user_id != user {
                return Err(RepositoryError::CorruptedData(format!(
                    "{} belongs to {}, not {user}",
                    update.power_id, update.user_id
                )));
            }
            match owned.iter_mut().find(|p| p.power_id == update.power_id) {
                Some(stored) => stored.equipped_slot = update.equipped_slot,
                None => {
                    return Err(RepositoryError::CorruptedData(format!(
                        "{user} does not own {}",
                        update.power_id
                    )));
                }
            }
        }

        self.undo.push(Undo::Inventory(user, prior));
        self.tables.inventories.insert(user, owned);
        Ok(())
    }
}
