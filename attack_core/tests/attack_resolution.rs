//! Integration test: Weapon -> Attack -> Mitigation -> Apply damage
//!
//! Uses a scripted dice service so every total is known up front.

use async_trait::async_trait;
use attack_core::combat::{apply_damage, Capacity, OutcomeFlags};
use attack_core::dice::TermOutcome;
use attack_core::prelude::*;
use attack_core::{AttackError, DiceServiceError, FormulaError, RollOutcome};
use std::sync::Mutex;

/// Returns a fixed total for to-hit rolls and another for damage rolls
struct ScriptedDice {
    attack_total: i32,
    damage_total: i32,
    fail: bool,
    rolled: Mutex<Vec<String>>,
}

impl ScriptedDice {
    fn new(attack_total: i32, damage_total: i32) -> Self {
        ScriptedDice {
            attack_total,
            damage_total,
            fail: false,
            rolled: Mutex::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        ScriptedDice {
            fail: true,
            ..Self::new(0, 0)
        }
    }

    fn rolled(&self) -> Vec<String> {
        self.rolled.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiceService for ScriptedDice {
    async fn evaluate(&self, formula: &str) -> Result<RollOutcome, DiceServiceError> {
        if self.fail {
            return Err(DiceServiceError::Backend("dice server offline".to_string()));
        }
        self.rolled.lock().unwrap().push(formula.to_string());

        let total = if formula.starts_with("1d20") {
            self.attack_total
        } else {
            self.damage_total
        };
        Ok(RollOutcome {
            formula: formula.to_string(),
            total,
            terms: vec![TermOutcome::Numeric { value: total, flavor: None }],
        })
    }
}

fn target(id: &str, value: i32, armor: ArmorTable) -> TargetProfile {
    TargetProfile {
        defense: Some(value),
        profile: Some(value),
        ..TargetProfile::new(id)
    }
    .with_armor(armor)
}

#[tokio::test]
async fn test_unarmored_hit_takes_full_damage() {
    let dice = ScriptedDice::new(15, 5);
    let grid = SquareGrid::default();
    let rules = RulesConstants::default();
    let resolver = AttackResolver::new(&dice, &grid, &rules);

    let weapon = WeaponProfile::new("Pistol", WeaponType::Ranged, "1d6+1");
    let outcome = resolver
        .resolve_attack(&AttackerProfile::default(), &weapon, &[target("a", 12, ArmorTable::new())])
        .await
        .unwrap();

    assert_eq!(outcome.damage_roll.total, 5);
    assert_eq!(outcome.damage_roll.formula, "1d6x + 1");
    let result = &outcome.results[0];
    assert!(result.is_hit);
    assert_eq!(result.damage_dealt, 5);
    assert!(!result.is_minimum_damage);
}

#[tokio::test]
async fn test_heavy_armor_floors_damage() {
    let dice = ScriptedDice::new(15, 5);
    let grid = SquareGrid::default();
    let rules = RulesConstants::default();
    let resolver = AttackResolver::new(&dice, &grid, &rules);

    let weapon = WeaponProfile::new("Pistol", WeaponType::Ranged, "1d6+1");
    let armor = ArmorTable::new().with(DamageType::Untyped, 10);
    let outcome = resolver
        .resolve_attack(&AttackerProfile::default(), &weapon, &[target("a", 12, armor)])
        .await
        .unwrap();

    let result = &outcome.results[0];
    assert_eq!(result.damage_dealt, 1);
    assert!(result.is_minimum_damage);
    assert_eq!(result.damage_formula, "5[Damage] - 1[Shots] * 10[Armor]");
}

#[tokio::test]
async fn test_equal_roll_hits() {
    let dice = ScriptedDice::new(15, 4);
    let grid = SquareGrid::default();
    let rules = RulesConstants::default();
    let resolver = AttackResolver::new(&dice, &grid, &rules);

    let weapon = WeaponProfile::new("Sword", WeaponType::Melee, "1d8");
    let outcome = resolver
        .resolve_attack(
            &AttackerProfile::default(),
            &weapon,
            &[target("even", 15, ArmorTable::new()), target("higher", 16, ArmorTable::new())],
        )
        .await
        .unwrap();

    assert!(outcome.results[0].is_hit);
    assert!(!outcome.results[1].is_hit);
    assert_eq!(outcome.results[0].defense_formula, "15[Defense]");
}

#[tokio::test]
async fn test_range_falloff_from_grid() {
    let dice = ScriptedDice::new(14, 6);
    let grid = SquareGrid::new(5, attack_core::grid::DiagonalRule::Equidistant);
    let rules = RulesConstants::default();
    let resolver = AttackResolver::new(&dice, &grid, &rules);

    let mut weapon = WeaponProfile::new("Rifle", WeaponType::Ranged, "2d6");
    weapon.range = 10;
    let attacker = AttackerProfile {
        position: Some(GridPosition::new(0, 0)),
        ..Default::default()
    };
    let far = target("far", 12, ArmorTable::new()).at(GridPosition::new(5, 0));

    let outcome = resolver.resolve_attack(&attacker, &weapon, &[far]).await.unwrap();

    let result = &outcome.results[0];
    assert_eq!(result.distance, 25);
    assert_eq!(result.effective_defense, 16);
    assert_eq!(result.defense_formula, "12[Profile] + 4[Range Modifier]");
    assert!(!result.is_hit);
}

#[tokio::test]
async fn test_no_targets_still_rolls_and_costs() {
    let dice = ScriptedDice::new(10, 7);
    let grid = SquareGrid::default();
    let rules = RulesConstants::default();
    let resolver = AttackResolver::new(&dice, &grid, &rules);

    let mut weapon = WeaponProfile::new("Rifle", WeaponType::Ranged, "2d6");
    weapon.capacity = Capacity::limited(4, 10);
    let outcome = resolver
        .resolve_attack(&AttackerProfile::default(), &weapon, &[])
        .await
        .unwrap();

    assert!(outcome.results.is_empty());
    assert_eq!(dice.rolled().len(), 2);
    assert_eq!(outcome.resource_deltas.ammo, Some(3));
    assert_eq!(outcome.flags, OutcomeFlags::default());
}

#[tokio::test]
async fn test_missing_defense_skips_only_that_target() {
    let dice = ScriptedDice::new(12, 6);
    let grid = SquareGrid::default();
    let rules = RulesConstants::default();
    let resolver = AttackResolver::new(&dice, &grid, &rules);

    let weapon = WeaponProfile::new("Pistol", WeaponType::Ranged, "1d6");
    let unknown = TargetProfile::new("unknown");
    let outcome = resolver
        .resolve_attack(
            &AttackerProfile::default(),
            &weapon,
            &[target("a", 10, ArmorTable::new()), unknown, target("b", 14, ArmorTable::new())],
        )
        .await
        .unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].target(), &TargetId::from("unknown"));
    assert_eq!(outcome.results[1].target, TargetId::from("b"));
}

#[tokio::test]
async fn test_bad_formula_rolls_nothing() {
    let dice = ScriptedDice::new(12, 6);
    let grid = SquareGrid::default();
    let rules = RulesConstants::default();
    let resolver = AttackResolver::new(&dice, &grid, &rules);

    let weapon = WeaponProfile::new("Broken", WeaponType::Melee, "2d6 + + 1");
    let err = resolver
        .resolve_attack(&AttackerProfile::default(), &weapon, &[target("a", 10, ArmorTable::new())])
        .await
        .unwrap_err();

    assert!(matches!(err, AttackError::InvalidWeapon { ref weapon, .. } if weapon == "Broken"));
    assert!(dice.rolled().is_empty());
}

#[tokio::test]
async fn test_oversized_damage_dice_rolls_nothing() {
    let dice = ScriptedDice::new(12, 6);
    let grid = SquareGrid::default();
    let rules = RulesConstants::default();
    let resolver = AttackResolver::new(&dice, &grid, &rules);

    let mut weapon = WeaponProfile::new("Minigun", WeaponType::Ranged, "1000000d6");
    weapon.number_of_attacks = 1000;
    let err = resolver
        .resolve_attack(&AttackerProfile::default(), &weapon, &[target("a", 10, ArmorTable::new())])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AttackError::InvalidWeapon { source: FormulaError::TooManyDice { .. }, .. }
    ));
    assert!(dice.rolled().is_empty());
}

#[tokio::test]
async fn test_dice_failure_aborts_attack() {
    let dice = ScriptedDice::failing();
    let grid = SquareGrid::default();
    let rules = RulesConstants::default();
    let resolver = AttackResolver::new(&dice, &grid, &rules);

    let weapon = WeaponProfile::new("Pistol", WeaponType::Ranged, "1d6");
    let err = resolver
        .resolve_attack(&AttackerProfile::default(), &weapon, &[target("a", 10, ArmorTable::new())])
        .await
        .unwrap_err();

    assert!(matches!(err, AttackError::DiceService(DiceServiceError::Backend(_))));
}

#[tokio::test]
async fn test_resource_flags() {
    let dice = ScriptedDice::new(12, 6);
    let grid = SquareGrid::default();
    let rules = RulesConstants::default();
    let resolver = AttackResolver::new(&dice, &grid, &rules);

    let mut weapon = WeaponProfile::new("Laser", WeaponType::Ranged, "1d6");
    weapon.capacity = Capacity::limited(1, 6);
    weapon.power_cost = 4;
    let attacker = AttackerProfile {
        power: Pool::new(2, 10),
        ..Default::default()
    };

    let outcome = resolver.resolve_attack(&attacker, &weapon, &[]).await.unwrap();
    assert_eq!(outcome.resource_deltas.ammo, Some(0));
    assert_eq!(outcome.resource_deltas.power, Some(-2));
    assert!(outcome.flags.out_of_ammo);
    assert!(outcome.flags.insufficient_power);
    assert!(outcome.summary().contains("OUT OF AMMO"));
}

#[tokio::test]
async fn test_multi_attack_scales_formula_and_armor() {
    let dice = ScriptedDice::new(20, 14);
    let grid = SquareGrid::default();
    let rules = RulesConstants {
        critical_rule: CriticalRule::Limited,
        ..Default::default()
    };
    let resolver = AttackResolver::new(&dice, &grid, &rules);

    let mut weapon = WeaponProfile::new("Burst Rifle", WeaponType::Ranged, "1d8 + 1");
    weapon.number_of_attacks = 3;
    weapon.attack_bonus = 2;
    weapon.armor_penetration = 1;
    weapon.damage_type = DamageType::Ballistic;
    let attacker = AttackerProfile {
        aim: 4,
        ..Default::default()
    };
    let armor = ArmorTable::new().with(DamageType::Ballistic, 3);

    let outcome = resolver
        .resolve_attack(&attacker, &weapon, &[target("a", 10, armor.clone())])
        .await
        .unwrap();

    assert_eq!(
        dice.rolled(),
        vec!["1d20 + 2[Attack Bonus] + 4[Aim]".to_string(), "3d8xo + 3".to_string()]
    );
    let result = &outcome.results[0];
    assert_eq!(result.damage_reduction, 6);
    assert_eq!(result.damage_dealt, 8);
    assert_eq!(
        result.damage_formula,
        "14[Damage] - 3[Shots] * (3[Armor] - 1[Armor Penetration])"
    );

    // the mitigated value is applied as final damage
    let instance = outcome.damage_instance_for(&result.target).unwrap();
    let change = apply_damage(20, &armor, &instance);
    assert_eq!(change.health_after, 12);
}

#[tokio::test]
async fn test_seeded_dice_end_to_end() {
    let dice = RngDiceService::seeded(42);
    let rules = default_rules();
    let grid = rules.grid;
    let resolver = AttackResolver::new(&dice, &grid, &rules);

    let weapons = default_weapons();
    let weapon = &weapons["assault_rifle"];
    let stats = attack_core::defense::DefenseStats::default();
    let targets = vec![TargetProfile::new("a").with_stats(&stats)];

    let outcome = resolver
        .resolve_attack(&AttackerProfile::default(), weapon, &targets)
        .await
        .unwrap();

    assert!((1..=20).contains(&outcome.attack_total()));
    assert!(outcome.damage_roll.total >= 3);
    assert_eq!(outcome.results.len(), 1);

    let restored = AttackOutcome::from_json(&outcome.to_json().unwrap()).unwrap();
    assert_eq!(restored, outcome);
}
