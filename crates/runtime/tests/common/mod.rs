#![allow(dead_code)]

use arena_core::{
    BattleId, PlayerRecord, PowerDefinition, PowerId, PowerType, Rarity, RarityId, Timestamp,
    UserId,
};
use arena_runtime::{Arena, CatalogOracleImpl, Clock, FixedRoll, InMemoryStore, ManualClock};

pub const ANA: UserId = UserId(1);
pub const BO: UserId = UserId(2);
pub const CY: UserId = UserId(3);

pub const JAB: PowerId = PowerId(10);
pub const GUARD: PowerId = PowerId(11);
pub const RIPOSTE: PowerId = PowerId(12);
pub const WARP: PowerId = PowerId(13);

pub const START: Timestamp = Timestamp(1_700_000_000_000);

pub struct Fixture {
    pub arena: Arena,
    pub clock: ManualClock,
}

pub fn power(
    id: PowerId,
    name: &str,
    power_type: PowerType,
    cooldown: u32,
    damage: i32,
    shield_duration: u32,
) -> PowerDefinition {
    PowerDefinition {
        id,
        name: name.into(),
        rarity_id: RarityId(1),
        power_type,
        cooldown,
        damage,
        shield_duration,
    }
}

pub fn rarity(id: i64, name: &str, drop_chance: f64) -> Rarity {
    Rarity {
        id: RarityId(id),
        name: name.into(),
        drop_chance,
        color: None,
    }
}

/// Jab (attack 2, cd 2s), Guard (shield 5s, cd 8s), Riposte (counter 4,
/// cd 6s) and Warp (unknown type), all Common.
pub fn battle_catalog() -> CatalogOracleImpl {
    let mut catalog = CatalogOracleImpl::new();
    catalog.add_rarity(rarity(1, "Common", 100.0));
    catalog.add_power(power(JAB, "Jab", PowerType::Attack, 2, 2, 0));
    catalog.add_power(power(GUARD, "Guard", PowerType::Defense, 8, 0, 5));
    catalog.add_power(power(RIPOSTE, "Riposte", PowerType::Counter, 6, 4, 0));
    catalog.add_power(power(WARP, "Warp", PowerType::Unknown, 1, 0, 0));
    catalog
}

pub fn users() -> Vec<PlayerRecord> {
    vec![
        PlayerRecord::new(ANA, "ana"),
        PlayerRecord::new(BO, "bo"),
        PlayerRecord::new(CY, "cy"),
    ]
}

pub fn fixture_with(catalog: CatalogOracleImpl, rolls: FixedRoll) -> Fixture {
    let clock = ManualClock::new(START);
    let arena = Arena::builder(InMemoryStore::with_users(users()))
        .catalog(catalog)
        .clock(clock.clone())
        .roll(rolls)
        .build()
        .expect("arena should build");
    Fixture { arena, clock }
}

pub fn fixture() -> Fixture {
    fixture_with(battle_catalog(), FixedRoll::constant(0.0))
}

impl Fixture {
    pub fn clock_now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Queues `player2` and lets `player1` find them, so `player1` is the
    /// battle's player1.
    pub fn start_battle(&self, player1: UserId, player2: UserId) -> BattleId {
        let waiting = self.arena.find_match(player2).expect("queueing should succeed");
        assert!(waiting.searching);

        let matched = self.arena.find_match(player1).expect("pairing should succeed");
        assert!(matched.matched);
        assert_eq!(matched.opponent_id, Some(player2));
        matched.battle_id.expect("matched response carries a battle id")
    }
}
