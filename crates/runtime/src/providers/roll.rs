//! Random roll sources for spins.

use std::sync::Mutex;

use arena_core::spin::ROLL_RANGE;
use rand::Rng;

/// Produces spin rolls in `[0, 100)`.
pub trait RollProvider: Send + Sync {
    fn roll(&self) -> f64;
}

/// Uniform rolls from the thread-local generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRoll;

impl RollProvider for ThreadRoll {
    fn roll(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..ROLL_RANGE)
    }
}

/// Replays a fixed sequence of rolls, repeating the last one when exhausted.
#[derive(Debug)]
pub struct FixedRoll {
    rolls: Mutex<Vec<f64>>,
    last: f64,
}

impl FixedRoll {
    /// Always returns `roll`.
    pub fn constant(roll: f64) -> Self {
        Self::sequence([roll])
    }

    pub fn sequence(rolls: impl IntoIterator<Item = f64>) -> Self {
        let mut rolls: Vec<f64> = rolls.into_iter().collect();
        let last = rolls.last().copied().unwrap_or(0.0);
        rolls.reverse();
        Self {
            rolls: Mutex::new(rolls),
            last,
        }
    }
}

impl RollProvider for FixedRoll {
    fn roll(&self) -> f64 {
        self.rolls
            .lock()
            .ok()
            .and_then(|mut rolls| rolls.pop())
            .unwrap_or(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_roll_stays_in_range() {
        for _ in 0..1_000 {
            let roll = ThreadRoll.roll();
            assert!((0.0..ROLL_RANGE).contains(&roll));
        }
    }

    #[test]
    fn fixed_roll_replays_then_repeats() {
        let rolls = FixedRoll::sequence([1.0, 50.0]);
        assert_eq!(rolls.roll(), 1.0);
        assert_eq!(rolls.roll(), 50.0);
        assert_eq!(rolls.roll(), 50.0);
    }
}
