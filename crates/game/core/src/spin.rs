//! Weighted spin draw over the power catalog.

use crate::catalog::PowerDefinition;

/// Upper bound (exclusive) of a spin roll, in percentage points.
pub const ROLL_RANGE: f64 = 100.0;

/// A power eligible for a spin, joined with its rarity's drop chance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpinCandidate {
    pub power: PowerDefinition,
    pub rarity_name: String,
    pub drop_chance: f64,
}

/// Picks the winner of a spin for `roll` in `[0, 100)`.
///
/// Walks `candidates` in the given order accumulating drop chances; the first
/// entry whose running total reaches `roll` wins. When rounding leaves the
/// roll above the final total, the first candidate is returned. Returns
/// `None` only for an empty table.
pub fn draw(candidates: &[SpinCandidate], roll: f64) -> Option<&SpinCandidate> {
    let mut cumulative = 0.0;
    for candidate in candidates {
        cumulative += candidate.drop_chance;
        if roll <= cumulative {
            return Some(candidate);
        }
    }
    candidates.first()
}

/// Sorts `candidates` into spin order: drop chance ascending, then power id.
pub fn sort_table(candidates: &mut [SpinCandidate]) {
    candidates.sort_by(|a, b| {
        a.drop_chance
            .total_cmp(&b.drop_chance)
            .then(a.power.id.cmp(&b.power.id))
    });
}

/// Candidates no roll can reach because the running total before them
/// already covers [`ROLL_RANGE`].
pub fn unreachable(candidates: &[SpinCandidate]) -> Vec<&SpinCandidate> {
    let mut cumulative = 0.0;
    let mut dead = Vec::new();
    for candidate in candidates {
        if cumulative >= ROLL_RANGE {
            dead.push(candidate);
        }
        cumulative += candidate.drop_chance;
    }
    dead
}
