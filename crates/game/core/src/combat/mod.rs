//! Battle resolution state machine.
//!
//! This module provides pure functions that advance a [`Battle`](crate::Battle)
//! in response to an attack or a power use. The caller supplies `now`, loads
//! the battle and power definition, and persists the mutated battle together
//! with any [`BattleEnd`] rewards in a single transaction.
//!
//! # Core Functions
//!
//! - [`resolve_attack`]: shield check, then counter check, then normal hit
//! - [`apply_power`]: dispatches on [`PowerType`](crate::PowerType)
//! - [`check_termination`]: detects a defeated side and finishes the battle
//! - [`cooldown`]: per-(battle, user, power) reuse gate

pub mod cooldown;
mod error;
mod power;
mod resolve;
mod termination;

pub use cooldown::CooldownKey;
pub use error::BattleError;
pub use power::{PowerEffect, apply_power};
pub use resolve::{AttackOutcome, AttackReport, resolve_attack};
pub use termination::{BattleEnd, check_termination};
