#[cfg(test)]
mod tests {
    use corsair_core::constants::*;
    use corsair_core::enums::{Rarity, ShipClass, WeaponKind};
    use corsair_core::rng::seeded;
    use corsair_core::types::*;
    use corsair_core::StaticCatalog;
    use proptest::prelude::*;

    use crate::error::LootError;
    use crate::generator::*;
    use crate::hold::*;

    fn hull(class: ShipClass, price: u64, cargo_capacity: u32) -> ShipType {
        ShipType {
            id: "hull".into(),
            name: "Hull".into(),
            class,
            max_hull: 300,
            max_shields: 100,
            maneuverability: 3.0,
            price,
            cargo_capacity,
            fuel_capacity: 0,
        }
    }

    fn rare(id: &str, rarity: Rarity, value: u64) -> RareItem {
        RareItem {
            id: id.into(),
            name: id.into(),
            rarity,
            value,
        }
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::new()
            .with_weapon(Weapon {
                id: "laser".into(),
                name: "Laser".into(),
                kind: WeaponKind::Laser,
                damage: 40,
                range: 500.0,
                accuracy: 80.0,
                cooldown: 1.0,
                shield_penetration: 0.0,
                ammo_capacity: 0,
                ammo_per_shot: 0,
                energy_cost: 0,
                price: 7_000,
            })
            .with_outfit(Outfit {
                id: "scanner".into(),
                name: "Scanner".into(),
                price: 3_000,
            })
            .with_commodity(Commodity {
                id: "ore".into(),
                name: "Ore".into(),
                base_price: 40,
            })
            .with_rare_item(rare("idol", Rarity::Uncommon, 900))
            .with_rare_item(rare("star_map", Rarity::Rare, 20_000))
            .with_rare_item(rare("void_core", Rarity::Legendary, 500_000))
    }

    fn loaded_ship(ship_type: &ShipType) -> Ship {
        Ship::from_type(ShipId(5), ship_type)
            .with_cargo("ore", 100)
            .with_weapon("laser")
            .with_weapon("laser")
            .with_outfit("scanner")
    }

    #[test]
    fn test_bare_ship_drops_no_items() {
        let catalog = catalog();
        let ft = hull(ShipClass::Capital, 2_000_000, 50);
        let bare = Ship::from_type(ShipId(1), &ft);

        for seed in 0..200 {
            let mut rng = seeded(seed);
            let loot = generate_loot(&bare, &ft, true, false, 0, &catalog, &mut rng);
            assert!(loot.cargo.is_empty());
            assert!(loot.weapons.is_empty());
            assert!(loot.outfits.is_empty());
            assert!(loot.credits >= 200_000);
        }
    }

    #[test]
    fn test_worthless_wreck_may_yield_nothing() {
        let catalog = StaticCatalog::new();
        let ft = hull(ShipClass::Shuttle, 0, 10);
        let bare = Ship::from_type(ShipId(1), &ft);
        let mut rng = seeded(3);

        let loot = generate_loot(&bare, &ft, false, false, 0, &catalog, &mut rng);
        assert!(loot.is_empty());
        assert_eq!(loot.total_value, 0);
        assert_eq!(loot.summary, "Nothing salvageable survived.");
    }

    #[test]
    fn test_credits_and_bounty() {
        let catalog = catalog();
        let ft = hull(ShipClass::Freighter, 100_000, 50);
        let ship = Ship::from_type(ShipId(1), &ft);

        for seed in 0..50 {
            let loot = generate_loot(&ship, &ft, false, false, 0, &catalog, &mut seeded(seed));
            assert!((10_000..=20_000).contains(&loot.credits), "credits {}", loot.credits);

            let paid =
                generate_loot(&ship, &ft, false, true, 25_000, &catalog, &mut seeded(seed));
            assert_eq!(paid.credits, loot.credits + 25_000);

            let unpaid =
                generate_loot(&ship, &ft, false, false, 25_000, &catalog, &mut seeded(seed));
            assert_eq!(unpaid.credits, loot.credits, "bounty only counts when one existed");
        }
    }

    #[test]
    fn test_cargo_survives_partially() {
        let catalog = catalog();
        let ft = hull(ShipClass::Freighter, 100_000, 200);
        let ship = loaded_ship(&ft);

        for seed in 0..50 {
            let loot = generate_loot(&ship, &ft, false, false, 0, &catalog, &mut seeded(seed));
            assert_eq!(loot.cargo.len(), 1);
            assert!((30..=60).contains(&loot.cargo[0].quantity));
        }
    }

    #[test]
    fn test_tiny_cargo_stacks_can_vanish() {
        let catalog = catalog();
        let ft = hull(ShipClass::Freighter, 100_000, 200);
        let ship = Ship::from_type(ShipId(1), &ft).with_cargo("ore", 1);

        let loot = generate_loot(&ship, &ft, false, false, 0, &catalog, &mut seeded(1));
        assert!(loot.cargo.is_empty(), "one unit at <= 60% floors to zero");
    }

    #[test]
    fn test_hostile_wrecks_give_up_more_weapons() {
        let catalog = catalog();
        let ft = hull(ShipClass::Fighter, 50_000, 20);
        let ship = Ship::from_type(ShipId(1), &ft).with_weapon("laser");
        let mut rng = seeded(99);

        let mut friendly = 0;
        let mut hostile = 0;
        for _ in 0..2_000 {
            friendly += generate_loot(&ship, &ft, false, false, 0, &catalog, &mut rng)
                .weapons
                .len();
            hostile += generate_loot(&ship, &ft, true, false, 0, &catalog, &mut rng)
                .weapons
                .len();
        }
        assert!(hostile > friendly, "hostile {hostile} vs friendly {friendly}");
        assert!((450..750).contains(&friendly));
        assert!((750..1050).contains(&hostile));
    }

    #[test]
    fn test_rare_item_chance_bonuses() {
        let approx = |a: f64, b: f64| (a - b).abs() < 1e-9;

        let freighter = hull(ShipClass::Freighter, 100_000, 50);
        assert!(approx(rare_item_chance(&freighter, false), RARE_BASE_CHANCE));

        let frigate = hull(ShipClass::Military, 600_000, 50);
        assert!(approx(rare_item_chance(&frigate, true), 0.28));

        let dreadnought = hull(ShipClass::Capital, 5_000_000, 50);
        assert!(approx(rare_item_chance(&dreadnought, true), 0.38));
        assert!(rare_item_chance(&dreadnought, true) <= RARE_CHANCE_CAP);

        let exact_tier = hull(ShipClass::Freighter, RARE_VALUE_TIER_1, 50);
        assert!(
            approx(rare_item_chance(&exact_tier, false), RARE_BASE_CHANCE),
            "bonus needs strictly more"
        );
    }

    #[test]
    fn test_rarity_roll_space() {
        assert_eq!(rarity_for_roll(0.0), Rarity::Legendary);
        assert_eq!(rarity_for_roll(4.99), Rarity::Legendary);
        assert_eq!(rarity_for_roll(5.0), Rarity::Epic);
        assert_eq!(rarity_for_roll(19.99), Rarity::Epic);
        assert_eq!(rarity_for_roll(20.0), Rarity::Rare);
        assert_eq!(rarity_for_roll(50.0), Rarity::Uncommon);
        assert_eq!(rarity_for_roll(99.9), Rarity::Uncommon);
    }

    #[test]
    fn test_empty_tier_falls_back_to_whole_catalog() {
        let catalog = StaticCatalog::new().with_rare_item(rare("relic", Rarity::Epic, 10_000));
        let ft = hull(ShipClass::Capital, 5_000_000, 50);
        let bare = Ship::from_type(ShipId(1), &ft);

        let mut found = 0;
        for seed in 0..300 {
            let loot = generate_loot(&bare, &ft, true, false, 0, &catalog, &mut seeded(seed));
            for id in &loot.rare_items {
                assert_eq!(id.as_str(), "relic");
                found += 1;
            }
        }
        assert!(found > 50, "38% of 300 wrecks should carry something, got {found}");
    }

    #[test]
    fn test_total_value_and_summary() {
        let catalog = catalog();
        let ft = hull(ShipClass::Military, 800_000, 200);
        let ship = loaded_ship(&ft);

        for seed in 0..30 {
            let loot = generate_loot(&ship, &ft, true, false, 0, &catalog, &mut seeded(seed));
            let rares: u64 = loot
                .rare_items
                .iter()
                .map(|id| match id.as_str() {
                    "idol" => 900,
                    "star_map" => 20_000,
                    _ => 500_000,
                })
                .sum();
            let expected = loot.credits
                + loot.cargo_units() as u64 * 40
                + loot.weapons.len() as u64 * 7_000
                + loot.outfits.len() as u64 * 3_000
                + rares;
            assert_eq!(loot.total_value, expected);
            assert!(loot.summary.starts_with("Recovered "));
            assert!(loot.summary.contains("credits"));
        }
    }

    #[test]
    fn test_seeded_loot_is_reproducible() {
        let catalog = catalog();
        let ft = hull(ShipClass::Capital, 3_000_000, 200);
        let ship = loaded_ship(&ft);
        let a = generate_loot(&ship, &ft, true, true, 1_000, &catalog, &mut seeded(8));
        let b = generate_loot(&ship, &ft, true, true, 1_000, &catalog, &mut seeded(8));
        assert_eq!(a, b);
    }

    fn sample_loot() -> LootDrop {
        LootDrop {
            credits: 1_500,
            cargo: vec![CargoItem {
                commodity: "ore".into(),
                quantity: 4,
            }],
            outfits: vec!["scanner".into()],
            weapons: vec!["laser".into()],
            rare_items: vec!["idol".into()],
            total_value: 0,
            summary: String::new(),
        }
    }

    #[test]
    fn test_space_accounting() {
        let loot = sample_loot();
        // 4 cargo + 5 weapon + 3 outfit + 1 rare
        assert_eq!(cargo_space_required(&loot), 13);

        let ft = hull(ShipClass::Freighter, 0, 30);
        let mut ship = Ship::from_type(ShipId(1), &ft).with_cargo("ore", 6);
        ship.hold.push(HoldItem::Weapon("laser".into()));
        assert_eq!(free_space(&ship, &ft), 19);
        assert!(can_carry_loot(&ship, &ft, &loot));

        ship.hold.push(HoldItem::Outfit("scanner".into()));
        ship.hold.push(HoldItem::Rare("idol".into()));
        assert_eq!(free_space(&ship, &ft), 15);
    }

    #[test]
    fn test_apply_loot_stows_everything() {
        let loot = sample_loot();
        let ft = hull(ShipClass::Freighter, 0, 20);
        let mut ship = Ship::from_type(ShipId(1), &ft).with_cargo("ore", 2);

        let credits = apply_loot(&mut ship, &ft, &loot).unwrap();
        assert_eq!(credits, 1_500);
        assert_eq!(ship.cargo[&CommodityId::from("ore")], 6);
        assert_eq!(
            ship.hold,
            vec![
                HoldItem::Weapon("laser".into()),
                HoldItem::Outfit("scanner".into()),
                HoldItem::Rare("idol".into()),
            ]
        );
        assert_eq!(free_space(&ship, &ft), 5);
    }

    #[test]
    fn test_apply_loot_is_all_or_nothing() {
        let loot = sample_loot();
        let ft = hull(ShipClass::Freighter, 0, 12);
        let mut ship = Ship::from_type(ShipId(1), &ft);
        let before = ship.clone();

        let err = apply_loot(&mut ship, &ft, &loot).unwrap_err();
        assert_eq!(
            err,
            LootError::InsufficientSpace {
                required: 13,
                available: 12,
            }
        );
        assert_eq!(err.to_string(), "not enough cargo space: need 13 t, have 12 t");
        assert_eq!(ship, before);
    }

    #[test]
    fn test_huge_cargo_saturates_instead_of_overflowing() {
        let catalog = catalog();
        let ft = hull(ShipClass::Freighter, 50_000, 100);
        let ship = Ship::from_type(ShipId(9), &ft)
            .with_cargo("ore", u32::MAX)
            .with_cargo("ice", u32::MAX)
            .with_cargo("gas", u32::MAX);
        assert_eq!(ship.cargo_units(), u32::MAX);
        assert_eq!(free_space(&ship, &ft), 0);

        let mut rng = seeded(11);
        let loot = generate_loot(&ship, &ft, true, true, u64::MAX, &catalog, &mut rng);
        assert_eq!(loot.cargo.len(), 3);
        let total: u64 = loot.cargo.iter().map(|item| item.quantity as u64).sum();
        assert_eq!(loot.cargo_units() as u64, total.min(u32::MAX as u64));
        assert_eq!(loot.credits, u64::MAX);
        assert_eq!(loot.total_value, u64::MAX);
        assert!(!can_carry_loot(&ship, &ft, &loot));

        let hoard = LootDrop {
            cargo: ["ore", "ice", "gas"]
                .into_iter()
                .map(|id| CargoItem {
                    commodity: id.into(),
                    quantity: u32::MAX,
                })
                .collect(),
            weapons: vec!["laser".into()],
            ..LootDrop::default()
        };
        assert_eq!(hoard.cargo_units(), u32::MAX);
        assert_eq!(cargo_space_required(&hoard), u32::MAX);
    }

    proptest! {
        #[test]
        fn prop_pickup_never_overfills(
            capacity in 0u32..80,
            aboard in 0u32..40,
            seed in any::<u64>(),
        ) {
            let catalog = catalog();
            let ft = hull(ShipClass::Military, 900_000, capacity);
            let wreck = loaded_ship(&ft);
            let loot = generate_loot(&wreck, &ft, true, false, 0, &catalog, &mut seeded(seed));

            let mut ship = Ship::from_type(ShipId(2), &ft).with_cargo("ore", aboard);
            let before = ship.clone();
            match apply_loot(&mut ship, &ft, &loot) {
                Ok(credits) => {
                    prop_assert_eq!(credits, loot.credits);
                    prop_assert_eq!(
                        free_space(&before, &ft) - free_space(&ship, &ft),
                        cargo_space_required(&loot)
                    );
                }
                Err(_) => prop_assert_eq!(ship, before),
            }
        }
    }
}
