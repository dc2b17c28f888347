//! Queue rules for pairing waiting players.

use crate::config::GameConfig;
use crate::state::{Timestamp, UserId};

/// A player waiting for an opponent. At most one entry exists per player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueEntry {
    pub player_id: UserId,
    pub joined_at: Timestamp,
}

impl QueueEntry {
    pub fn new(player_id: UserId, joined_at: Timestamp) -> Self {
        Self {
            player_id,
            joined_at,
        }
    }
}

/// Entries that joined strictly before the returned instant are stale.
pub fn expiry_cutoff(now: Timestamp, config: &GameConfig) -> Timestamp {
    now - config.queue_expiry_ms()
}

pub fn is_expired(entry: &QueueEntry, cutoff: Timestamp) -> bool {
    entry.joined_at < cutoff
}

/// Oldest waiting entry belonging to someone other than `seeker`.
///
/// Ties on `joined_at` break on player id so the choice is deterministic.
pub fn select_opponent<'a, I>(entries: I, seeker: UserId) -> Option<&'a QueueEntry>
where
    I: IntoIterator<Item = &'a QueueEntry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.player_id != seeker)
        .min_by_key(|entry| (entry.joined_at, entry.player_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_keeps_entries_exactly_at_threshold() {
        let config = GameConfig::default();
        let now = Timestamp(100_000);
        let cutoff = expiry_cutoff(now, &config);

        assert_eq!(cutoff, Timestamp(75_000));
        assert!(!is_expired(&QueueEntry::new(UserId(1), Timestamp(75_000)), cutoff));
        assert!(is_expired(&QueueEntry::new(UserId(1), Timestamp(70_000)), cutoff));
    }

    #[test]
    fn selects_oldest_other_player() {
        let entries = vec![
            QueueEntry::new(UserId(3), Timestamp(300)),
            QueueEntry::new(UserId(1), Timestamp(100)),
            QueueEntry::new(UserId(2), Timestamp(200)),
        ];

        let picked = select_opponent(&entries, UserId(1)).unwrap();
        assert_eq!(picked.player_id, UserId(2));
    }

    #[test]
    fn never_selects_the_seeker() {
        let entries = vec![QueueEntry::new(UserId(7), Timestamp(1))];
        assert!(select_opponent(&entries, UserId(7)).is_none());
    }
}
