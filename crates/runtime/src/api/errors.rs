//! Unified error types surfaced by the arena API.
//!
//! Wraps rule violations from `arena-core`, lookups that came back empty, and
//! repository failures so every caller sees one taxonomy with a stable kind
//! and status code.
use arena_core::{BattleError, BattleId, ErrorSeverity, GameError, LoadoutError, PowerId, UserId};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{0} not found")]
    UserNotFound(UserId),

    #[error("{0} not found")]
    BattleNotFound(BattleId),

    #[error("{0} not found")]
    PowerNotFound(PowerId),

    #[error("power catalog is empty")]
    EmptyCatalog,

    #[error("{0} has no spins left")]
    NotEnoughSpins(UserId),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error(transparent)]
    Loadout(#[from] LoadoutError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("arena requires a power catalog before building")]
    MissingCatalog,

    #[error("request worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

/// Client-visible error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    InvalidState,
    Forbidden,
    OnCooldown,
    InvalidPowerType,
    InsufficientResource,
    InvalidArgument,
    Internal,
}

impl ErrorKind {
    /// HTTP-style status code carried in error envelopes.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::NotFound => 404,
            ErrorKind::Forbidden => 403,
            ErrorKind::OnCooldown => 429,
            ErrorKind::InvalidState
            | ErrorKind::InvalidPowerType
            | ErrorKind::InsufficientResource
            | ErrorKind::InvalidArgument => 400,
            ErrorKind::Internal => 500,
        }
    }
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::UserNotFound(_)
            | RuntimeError::BattleNotFound(_)
            | RuntimeError::PowerNotFound(_)
            | RuntimeError::EmptyCatalog => ErrorKind::NotFound,
            RuntimeError::NotEnoughSpins(_) => ErrorKind::InsufficientResource,
            RuntimeError::Battle(err) => match err {
                BattleError::NotActive(_) => ErrorKind::InvalidState,
                BattleError::NotParticipant { .. } => ErrorKind::Forbidden,
                BattleError::OnCooldown { .. } => ErrorKind::OnCooldown,
                BattleError::InvalidPowerType(_) => ErrorKind::InvalidPowerType,
            },
            RuntimeError::Loadout(err) => match err {
                LoadoutError::InvalidSlot(_) => ErrorKind::InvalidArgument,
                LoadoutError::NotOwned(_) => ErrorKind::NotFound,
            },
            RuntimeError::InvalidRequest(_) => ErrorKind::InvalidArgument,
            RuntimeError::Repository(_)
            | RuntimeError::MissingCatalog
            | RuntimeError::WorkerJoin(_) => ErrorKind::Internal,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Battle(err) => err.severity(),
            RuntimeError::Loadout(err) => err.severity(),
            RuntimeError::Repository(RepositoryError::CorruptedData(_)) => ErrorSeverity::Fatal,
            RuntimeError::Repository(_)
            | RuntimeError::MissingCatalog
            | RuntimeError::WorkerJoin(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::UserNotFound(_) => "USER_NOT_FOUND",
            RuntimeError::BattleNotFound(_) => "BATTLE_NOT_FOUND",
            RuntimeError::PowerNotFound(_) => "POWER_NOT_FOUND",
            RuntimeError::EmptyCatalog => "CATALOG_EMPTY",
            RuntimeError::NotEnoughSpins(_) => "SPIN_NOT_ENOUGH",
            RuntimeError::Battle(err) => err.error_code(),
            RuntimeError::Loadout(err) => err.error_code(),
            RuntimeError::InvalidRequest(_) => "REQUEST_INVALID",
            RuntimeError::Repository(_) => "STORE_FAILURE",
            RuntimeError::MissingCatalog => "RUNTIME_MISSING_CATALOG",
            RuntimeError::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
        }
    }
}
