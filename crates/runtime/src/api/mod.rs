//! Public arena API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate:
//! the error taxonomy, typed requests and responses, and the async handle.

pub mod errors;
pub mod handle;
pub mod request;
pub mod response;

pub use errors::{ErrorKind, Result, RuntimeError};
pub use handle::ArenaHandle;
pub use request::Request;
pub use response::{
    AttackResponse, BattleStateResponse, BattleSummary, CancelSearchResponse, CatalogEntry,
    CatalogResponse, CheckMatchResponse, Envelope, EquipResponse, ErrorBody, FindMatchResponse,
    InventoryEntry, InventoryResponse, PowerUseEffect, Response, SpinResponse, UnequipResponse,
    UsePowerResponse, UserStatsResponse,
};
