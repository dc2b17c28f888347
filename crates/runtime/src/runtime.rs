//! High-level arena orchestrator.
//!
//! [`Arena`] owns the store, the catalog oracle and the time/roll providers,
//! and runs every operation as one store transaction. [`ArenaBuilder`] wires
//! those pieces together; [`ArenaHandle`] offers an async façade for servers.

use std::sync::Arc;

use arena_content::CatalogData;
use arena_core::{BattleId, GameConfig, GameError, PowerCatalog, PowerId, UserId};
use tracing::{debug, warn};

use crate::api::{
    ArenaHandle, AttackResponse, BattleStateResponse, CancelSearchResponse, CatalogResponse,
    CheckMatchResponse, EquipResponse, ErrorKind, FindMatchResponse, InventoryResponse, Request,
    Response, Result, RuntimeError, SpinResponse, UnequipResponse, UsePowerResponse,
    UserStatsResponse,
};
use crate::oracle::CatalogOracleImpl;
use crate::providers::{Clock, RollProvider, SystemClock, ThreadRoll};
use crate::repository::{ArenaStore, InMemoryStore};
use crate::services::{ServiceContext, battle, inventory, matchmaker};

/// Battle arena bound to a store.
pub struct Arena<S = InMemoryStore> {
    store: S,
    catalog: Arc<dyn PowerCatalog>,
    config: GameConfig,
    clock: Arc<dyn Clock>,
    roll: Arc<dyn RollProvider>,
}

impl<S: ArenaStore> Arena<S> {
    /// Create a new arena builder around `store`
    pub fn builder(store: S) -> ArenaBuilder<S> {
        ArenaBuilder::new(store)
    }

    /// Wrap the arena in a cloneable async handle
    pub fn into_handle(self) -> ArenaHandle<S>
    where
        S: 'static,
    {
        ArenaHandle::new(Arc::new(self))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reads the clock. Called inside the transaction so `now` never runs
    /// backwards in commit order.
    fn context(&self) -> ServiceContext<'_> {
        ServiceContext {
            config: &self.config,
            catalog: self.catalog.as_ref(),
            now: self.clock.now(),
        }
    }

    pub fn find_match(&self, player: UserId) -> Result<FindMatchResponse> {
        self.store.transaction(|tx| {
            let ctx = self.context();
            matchmaker::find_match(tx, &ctx, player)
        })
    }

    pub fn cancel_search(&self, player: UserId) -> Result<CancelSearchResponse> {
        self.store.transaction(|tx| {
            let ctx = self.context();
            matchmaker::cancel_search(tx, &ctx, player)
        })
    }

    pub fn check_match(&self, player: UserId) -> Result<CheckMatchResponse> {
        self.store.transaction(|tx| matchmaker::check_match(tx, player))
    }

    pub fn battle_state(&self, battle_id: BattleId) -> Result<BattleStateResponse> {
        self.store.transaction(|tx| battle::battle_state(tx, battle_id))
    }

    /// Basic attack for `GameConfig::basic_attack_damage`.
    pub fn attack(&self, battle_id: BattleId, player: UserId) -> Result<AttackResponse> {
        self.store.transaction(|tx| {
            let ctx = self.context();
            battle::attack(tx, &ctx, battle_id, player)
        })
    }

    pub fn use_power(
        &self,
        battle_id: BattleId,
        user: UserId,
        power_id: PowerId,
    ) -> Result<UsePowerResponse> {
        self.store.transaction(|tx| {
            let ctx = self.context();
            battle::use_power(tx, &ctx, battle_id, user, power_id)
        })
    }

    pub fn spin(&self, user: UserId) -> Result<SpinResponse> {
        let roll = self.roll.roll();
        self.store.transaction(|tx| {
            let ctx = self.context();
            inventory::spin(tx, &ctx, user, roll)
        })
    }

    pub fn equip_power(&self, user: UserId, power_id: PowerId, slot: u8) -> Result<EquipResponse> {
        self.store.transaction(|tx| inventory::equip_power(tx, user, power_id, slot))
    }

    pub fn unequip_power(&self, user: UserId, power_id: PowerId) -> Result<UnequipResponse> {
        self.store.transaction(|tx| inventory::unequip_power(tx, user, power_id))
    }

    pub fn inventory(&self, user: UserId) -> Result<InventoryResponse> {
        self.store.transaction(|tx| {
            let ctx = self.context();
            inventory::inventory(tx, &ctx, user)
        })
    }

    pub fn user_stats(&self, user: UserId) -> Result<UserStatsResponse> {
        self.store.transaction(|tx| inventory::user_stats(tx, user))
    }

    pub fn catalog(&self) -> CatalogResponse {
        inventory::catalog(self.catalog.as_ref())
    }

    /// Routes a typed request to its operation.
    pub fn dispatch(&self, request: Request) -> Result<Response> {
        let action = request.action();
        let result = match request {
            Request::FindMatch { player_id } => {
                self.find_match(player_id).map(Response::FindMatch)
            }
            Request::CancelSearch { player_id } => {
                self.cancel_search(player_id).map(Response::CancelSearch)
            }
            Request::CheckMatch { player_id } => {
                self.check_match(player_id).map(Response::CheckMatch)
            }
            Request::BattleState { battle_id } => {
                self.battle_state(battle_id).map(Response::BattleState)
            }
            Request::Attack {
                battle_id,
                player_id,
            } => self.attack(battle_id, player_id).map(Response::Attack),
            Request::UsePower {
                battle_id,
                user_id,
                power_id,
            } => self
                .use_power(battle_id, user_id, power_id)
                .map(Response::UsePower),
            Request::Spin { user_id } => self.spin(user_id).map(Response::Spin),
            Request::EquipPower {
                user_id,
                power_id,
                slot,
            } => self
                .equip_power(user_id, power_id, slot)
                .map(Response::Equip),
            Request::UnequipPower { user_id, power_id } => self
                .unequip_power(user_id, power_id)
                .map(Response::Unequip),
            Request::Inventory { user_id } => self.inventory(user_id).map(Response::Inventory),
            Request::UserStats { user_id } => self.user_stats(user_id).map(Response::UserStats),
            Request::Catalog => Ok(Response::Catalog(self.catalog())),
        };

        if let Err(err) = &result {
            if err.kind() == ErrorKind::Internal {
                warn!(action, code = err.error_code(), error = %err, "request failed");
            } else {
                debug!(action, code = err.error_code(), error = %err, "request rejected");
            }
        }
        result
    }
}

/// Builder for [`Arena`].
pub struct ArenaBuilder<S> {
    store: S,
    catalog: Option<Arc<dyn PowerCatalog>>,
    config: GameConfig,
    clock: Arc<dyn Clock>,
    roll: Arc<dyn RollProvider>,
}

impl<S: ArenaStore> ArenaBuilder<S> {
    fn new(store: S) -> Self {
        Self {
            store,
            catalog: None,
            config: GameConfig::default(),
            clock: Arc::new(SystemClock),
            roll: Arc::new(ThreadRoll),
        }
    }

    /// Set the rule table
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the catalog oracle
    pub fn catalog(mut self, catalog: impl PowerCatalog + 'static) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    /// Build the catalog oracle from loaded content
    pub fn catalog_data(self, data: CatalogData) -> Self {
        self.catalog(CatalogOracleImpl::from_content(data))
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn roll(mut self, roll: impl RollProvider + 'static) -> Self {
        self.roll = Arc::new(roll);
        self
    }

    pub fn build(self) -> Result<Arena<S>> {
        let catalog = self.catalog.ok_or(RuntimeError::MissingCatalog)?;
        Ok(Arena {
            store: self.store,
            catalog,
            config: self.config,
            clock: self.clock,
            roll: self.roll,
        })
    }
}
