mod common;

use arena_core::{PlayerRecord, PowerId, PowerType, UserId};
use arena_runtime::{ArenaStore, CatalogOracleImpl, ErrorKind, FixedRoll, RepositoryError};
use common::*;

const STAR: PowerId = PowerId(20);
const STICK: PowerId = PowerId(21);

/// Legendary STAR (10%) and Common STICK (50%): rolls above 60 match nothing.
fn gapped_catalog() -> CatalogOracleImpl {
    let mut catalog = CatalogOracleImpl::new();
    catalog.add_rarity(rarity(1, "Common", 50.0));
    catalog.add_rarity(rarity(2, "Legendary", 10.0));
    catalog.add_power(power(STICK, "Stick", PowerType::Attack, 1, 1, 0));
    let mut star = power(STAR, "Star", PowerType::Attack, 10, 8, 0);
    star.rarity_id = arena_core::RarityId(2);
    catalog.add_power(star);
    catalog
}

fn give_spins(fx: &Fixture, user: UserId, spins: u32) {
    let record = PlayerRecord::new(user, "spinner").with_spins(spins);
    fx.arena.store().insert_user(record).unwrap();
}

#[test]
fn spin_without_tokens_changes_nothing() {
    let fx = fixture();

    let err = fx.arena.spin(ANA).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientResource);

    let stats = fx.arena.user_stats(ANA).unwrap();
    assert_eq!(stats.spins, 0);
    assert!(fx.arena.inventory(ANA).unwrap().powers.is_empty());
}

#[test]
fn weighted_draw_follows_the_roll() {
    let fx = fixture_with(gapped_catalog(), FixedRoll::sequence([5.0, 10.0, 35.0]));
    give_spins(&fx, ANA, 3);

    assert_eq!(fx.arena.spin(ANA).unwrap().power.id, STAR);
    // A roll equal to the running total still selects that entry.
    assert_eq!(fx.arena.spin(ANA).unwrap().power.id, STAR);
    assert_eq!(fx.arena.spin(ANA).unwrap().power.id, STICK);
}

#[test]
fn roll_past_the_table_falls_back_to_the_first_entry() {
    let fx = fixture_with(gapped_catalog(), FixedRoll::constant(99.0));
    give_spins(&fx, ANA, 1);

    let spun = fx.arena.spin(ANA).unwrap();
    assert_eq!(spun.power.id, STAR);
    assert_eq!(spun.power.rarity_name, "Legendary");
}

#[test]
fn duplicate_draws_consume_a_token_without_duplicating_ownership() {
    let fx = fixture();
    give_spins(&fx, ANA, 2);

    let first = fx.arena.spin(ANA).unwrap();
    assert!(first.newly_obtained);
    assert_eq!(first.spins_left, 1);

    fx.clock.advance_secs(1);
    let second = fx.arena.spin(ANA).unwrap();
    assert_eq!(second.power.id, first.power.id);
    assert!(!second.newly_obtained);
    assert_eq!(second.spins_left, 0);

    assert_eq!(fx.arena.inventory(ANA).unwrap().powers.len(), 1);
    assert_eq!(fx.arena.user_stats(ANA).unwrap().spins, 0);
}

#[test]
fn empty_catalog_is_not_found_and_keeps_the_token() {
    let fx = fixture_with(CatalogOracleImpl::new(), FixedRoll::constant(1.0));
    give_spins(&fx, ANA, 1);

    let err = fx.arena.spin(ANA).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(fx.arena.user_stats(ANA).unwrap().spins, 1);
}

#[test]
fn winning_a_battle_earns_a_spin() {
    let fx = fixture();
    let battle = fx.start_battle(ANA, BO);
    for _ in 0..5 {
        fx.arena.attack(battle, ANA).unwrap();
    }

    let spun = fx.arena.spin(ANA).unwrap();
    assert_eq!(spun.power.id, JAB);
    assert_eq!(spun.spins_left, 0);
}

fn grant(fx: &Fixture, user: UserId, powers: &[PowerId]) {
    let granted: Result<(), RepositoryError> = fx.arena.store().transaction(|tx| {
        for (offset, &power_id) in powers.iter().enumerate() {
            let obtained_at = START + offset as u64 * 1_000;
            tx.grant_power(arena_core::UserPower::new(user, power_id, obtained_at))?;
        }
        Ok(())
    });
    granted.unwrap();
}

#[test]
fn equipping_into_an_occupied_slot_displaces_the_occupant() {
    let fx = fixture();
    grant(&fx, ANA, &[JAB, GUARD]);

    let first = fx.arena.equip_power(ANA, JAB, 1).unwrap();
    assert_eq!(first.displaced, None);

    let second = fx.arena.equip_power(ANA, GUARD, 1).unwrap();
    assert_eq!(second.displaced, Some(JAB));

    let inventory = fx.arena.inventory(ANA).unwrap();
    let slots: Vec<_> = inventory
        .powers
        .iter()
        .map(|entry| (entry.power_id, entry.equipped_slot.map(|slot| slot.get())))
        .collect();
    assert_eq!(slots, vec![(GUARD, Some(1)), (JAB, None)]);
}

#[test]
fn moving_a_power_frees_its_old_slot() {
    let fx = fixture();
    grant(&fx, ANA, &[JAB]);

    fx.arena.equip_power(ANA, JAB, 1).unwrap();
    fx.arena.equip_power(ANA, JAB, 3).unwrap();

    let inventory = fx.arena.inventory(ANA).unwrap();
    assert_eq!(inventory.powers[0].equipped_slot.map(|slot| slot.get()), Some(3));
}

#[test]
fn equip_rejects_bad_slots_and_unowned_powers() {
    let fx = fixture();
    grant(&fx, ANA, &[JAB]);

    for slot in [0, 4] {
        let err = fx.arena.equip_power(ANA, JAB, slot).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    let err = fx.arena.equip_power(ANA, GUARD, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = fx.arena.equip_power(UserId(404), JAB, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn unequip_clears_the_slot() {
    let fx = fixture();
    grant(&fx, ANA, &[JAB]);
    fx.arena.equip_power(ANA, JAB, 2).unwrap();

    let cleared = fx.arena.unequip_power(ANA, JAB).unwrap();
    assert_eq!(cleared.slot.map(|slot| slot.get()), Some(2));

    let again = fx.arena.unequip_power(ANA, JAB).unwrap();
    assert_eq!(again.slot, None);

    let err = fx.arena.unequip_power(ANA, GUARD).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn inventory_lists_newest_first_with_catalog_details() {
    let fx = fixture();
    grant(&fx, ANA, &[JAB, GUARD, RIPOSTE]);

    let inventory = fx.arena.inventory(ANA).unwrap();
    let ids: Vec<_> = inventory.powers.iter().map(|entry| entry.power_id).collect();
    assert_eq!(ids, vec![RIPOSTE, GUARD, JAB]);
    assert_eq!(inventory.powers[0].name.as_deref(), Some("Riposte"));
    assert_eq!(inventory.powers[0].power_type, Some(PowerType::Counter));
}

#[test]
fn catalog_is_listed_in_spin_order() {
    let fx = fixture_with(gapped_catalog(), FixedRoll::constant(0.0));

    let catalog = fx.arena.catalog();
    let ids: Vec<_> = catalog.powers.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![STAR, STICK]);
    assert_eq!(catalog.powers[0].drop_chance, 10.0);
}

#[test]
fn stats_for_unknown_users_are_not_found() {
    let fx = fixture();
    let err = fx.arena.user_stats(UserId(404)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let stats = fx.arena.user_stats(BO).unwrap();
    assert_eq!(stats.nick, "bo");
}
