//! Runtime orchestration for the battle arena.
//!
//! This crate wires the pure rules of `arena-core` to storage, time and
//! randomness. Consumers build an [`Arena`] over an [`ArenaStore`] and call
//! its operations directly, or wrap it in an [`ArenaHandle`] to serve
//! JSON requests from async code.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the request/response types and the handle
//! - [`services`] implements each operation inside one transaction
//! - [`oracle`] and [`repository`] provide data adapters
//! - [`providers`] supplies clocks and spin rolls
pub mod api;
pub mod oracle;
pub mod providers;
pub mod repository;
pub mod runtime;
pub mod services;

pub use api::{ArenaHandle, Envelope, ErrorKind, Request, Response, Result, RuntimeError};
pub use oracle::CatalogOracleImpl;
pub use providers::{Clock, FixedRoll, ManualClock, RollProvider, SystemClock, ThreadRoll};
pub use repository::{ArenaStore, InMemoryStore, RepositoryError, Transaction};
pub use runtime::{Arena, ArenaBuilder};
