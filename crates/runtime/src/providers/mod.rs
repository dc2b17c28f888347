//! Time and randomness providers injected into the arena.

pub mod clock;
pub mod roll;

pub use clock::{Clock, ManualClock, SystemClock};
pub use roll::{FixedRoll, RollProvider, ThreadRoll};
