//! Armor - flat per-attack damage reduction with a minimum damage floor

use crate::types::DamageType;
use serde::de::value::StringDeserializer;
use serde::de::IntoDeserializer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Armor values by damage type; types without an entry count as 0
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArmorTable(BTreeMap<DamageType, u32>);

impl ArmorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Armor against a damage type; `True` damage is never armored
    pub fn get(&self, damage_type: DamageType) -> u32 {
        if !damage_type.is_armored() {
            return 0;
        }
        self.0.get(&damage_type).copied().unwrap_or(0)
    }

    pub fn set(&mut self, damage_type: DamageType, value: u32) {
        self.0.insert(damage_type, value);
    }

    pub fn with(mut self, damage_type: DamageType, value: u32) -> Self {
        self.set(damage_type, value);
        self
    }

    /// Add armor to one type, or to every armorable type
    pub fn add_bonus(&mut self, bonus: &ArmorBonus) {
        match bonus.armor_type {
            ArmorTarget::All => {
                for &damage_type in DamageType::armored() {
                    self.add(damage_type, bonus.value);
                }
            }
            ArmorTarget::Type(damage_type) if damage_type.is_armored() => {
                self.add(damage_type, bonus.value);
            }
            ArmorTarget::Type(_) => {}
        }
    }

    /// Total armor from a set of worn armor bonuses
    pub fn from_bonuses<'a>(bonuses: impl IntoIterator<Item = &'a ArmorBonus>) -> Self {
        let mut table = Self::new();
        for bonus in bonuses {
            table.add_bonus(bonus);
        }
        table
    }

    fn add(&mut self, damage_type: DamageType, value: u32) {
        let entry = self.0.entry(damage_type).or_insert(0);
        *entry = entry.saturating_add(value);
    }
}

/// What an armor bonus protects against; written as a damage type name or `all`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmorTarget {
    Type(DamageType),
    All,
}

impl Serialize for ArmorTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ArmorTarget::All => serializer.serialize_str("all"),
            ArmorTarget::Type(damage_type) => damage_type.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ArmorTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        if name == "all" {
            return Ok(ArmorTarget::All);
        }
        let name: StringDeserializer<D::Error> = name.into_deserializer();
        DamageType::deserialize(name).map(ArmorTarget::Type)
    }
}

/// One armor bonus granted by a worn armor item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorBonus {
    pub armor_type: ArmorTarget,
    pub value: u32,
}

/// Breakdown of armor applied to one damage roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorMitigation {
    /// Armor the target has against the damage type
    pub armor: u32,
    /// Total reduction across all attacks
    pub damage_reduction: u32,
    /// Damage left after reduction and the minimum floor
    pub damage_dealt: u32,
    /// Whether the floor, not the roll, decided the damage
    pub is_minimum: bool,
}

/// Total damage reduction for a group of attacks
///
/// `max(armor - armor_penetration, 0) * number_of_attacks`
pub fn calculate_damage_reduction(armor: u32, armor_penetration: u32, number_of_attacks: u32) -> u32 {
    armor
        .saturating_sub(armor_penetration)
        .saturating_mul(number_of_attacks)
}

/// Apply armor to a rolled damage total
///
/// Damage never drops below `number_of_attacks`: every attack in the group
/// deals at least one point, however thick the armor.
pub fn apply_armor(
    damage_total: u32,
    armor: u32,
    armor_penetration: u32,
    number_of_attacks: u32,
) -> ArmorMitigation {
    let damage_reduction = calculate_damage_reduction(armor, armor_penetration, number_of_attacks);
    let damage_dealt = damage_total
        .saturating_sub(damage_reduction)
        .max(number_of_attacks);
    let is_minimum = damage_reduction > 0 && damage_dealt == number_of_attacks;

    ArmorMitigation {
        armor,
        damage_reduction,
        damage_dealt,
        is_minimum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_no_armor() {
        let result = apply_armor(5, 0, 0, 1);
        assert_eq!(result.damage_dealt, 5);
        assert_eq!(result.damage_reduction, 0);
        assert!(!result.is_minimum);
    }

    #[test]
    fn test_heavy_armor_hits_floor() {
        let result = apply_armor(5, 10, 0, 1);
        assert_eq!(result.damage_reduction, 10);
        assert_eq!(result.damage_dealt, 1);
        assert!(result.is_minimum);
    }

    #[test]
    fn test_penetration_and_attack_count() {
        // (4 - 1) * 3 = 9 reduction
        let result = apply_armor(20, 4, 1, 3);
        assert_eq!(result.damage_reduction, 9);
        assert_eq!(result.damage_dealt, 11);
        assert!(!result.is_minimum);
    }

    #[test]
    fn test_penetration_exceeding_armor() {
        assert_eq!(calculate_damage_reduction(2, 5, 4), 0);
    }

    #[test]
    fn test_floor_without_reduction_is_not_minimum() {
        // a zero roll is lifted to the floor, but no armor was involved
        let result = apply_armor(0, 0, 0, 2);
        assert_eq!(result.damage_dealt, 2);
        assert!(!result.is_minimum);
    }

    #[test]
    fn test_reduction_landing_exactly_on_floor() {
        let result = apply_armor(7, 5, 0, 1);
        assert_eq!(result.damage_dealt, 2);
        let result = apply_armor(6, 5, 0, 1);
        assert_eq!(result.damage_dealt, 1);
        assert!(result.is_minimum);
    }

    #[test]
    fn test_armor_table_lookup() {
        let table = ArmorTable::new().with(DamageType::Ballistic, 3);
        assert_eq!(table.get(DamageType::Ballistic), 3);
        assert_eq!(table.get(DamageType::Fire), 0);
    }

    #[test]
    fn test_true_damage_ignores_armor() {
        let table = ArmorTable::from_bonuses(&[ArmorBonus {
            armor_type: ArmorTarget::All,
            value: 5,
        }]);
        assert_eq!(table.get(DamageType::True), 0);
        assert_eq!(table.get(DamageType::Psi), 5);
    }

    #[test]
    fn test_bonuses_stack() {
        let bonuses = [
            ArmorBonus {
                armor_type: ArmorTarget::All,
                value: 1,
            },
            ArmorBonus {
                armor_type: ArmorTarget::Type(DamageType::Energy),
                value: 2,
            },
        ];
        let table = ArmorTable::from_bonuses(&bonuses);
        assert_eq!(table.get(DamageType::Energy), 3);
        assert_eq!(table.get(DamageType::Fire), 1);
    }

    #[test]
    fn test_armor_target_names() {
        let all: ArmorTarget = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(all, ArmorTarget::All);
        let fire: ArmorTarget = serde_json::from_str("\"fire\"").unwrap();
        assert_eq!(fire, ArmorTarget::Type(DamageType::Fire));
    }

    proptest! {
        #[test]
        fn prop_damage_never_below_attack_count(
            total in 0u32..500,
            armor in 0u32..50,
            pen in 0u32..50,
            attacks in 1u32..8,
        ) {
            let result = apply_armor(total, armor, pen, attacks);
            let expected = (total as i64 - (armor as i64 - pen as i64).max(0) * attacks as i64)
                .max(attacks as i64);
            prop_assert_eq!(result.damage_dealt as i64, expected);
            prop_assert!(result.damage_dealt >= attacks);
        }
    }
}
