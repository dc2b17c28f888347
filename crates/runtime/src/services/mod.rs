//! Transactional operations behind the arena API.
//!
//! Each service function runs inside one [`Transaction`] handed out by
//! [`ArenaStore::transaction`](crate::repository::ArenaStore::transaction).
//! Rule decisions are delegated to `arena-core`; this layer loads rows,
//! applies the rules, persists what changed and shapes the response.
//! Returning `Err` from any of them discards every staged write.

pub mod battle;
pub mod cooldown;
pub mod inventory;
pub mod matchmaker;

use arena_core::{GameConfig, PlayerRecord, PowerCatalog, Timestamp, UserId};

use crate::api::{Result, RuntimeError};
use crate::repository::Transaction;

/// Read-only inputs shared by every operation of one request.
#[derive(Clone, Copy)]
pub struct ServiceContext<'a> {
    pub config: &'a GameConfig,
    pub catalog: &'a dyn PowerCatalog,
    /// Instant the request is evaluated at. Fixed for the whole transaction.
    pub now: Timestamp,
}

pub(crate) fn require_user(tx: &dyn Transaction, id: UserId) -> Result<PlayerRecord> {
    tx.user(id)?.ok_or(RuntimeError::UserNotFound(id))
}
