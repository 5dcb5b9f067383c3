//! Attack inputs - snapshots of the weapon, the attacker and each target

use crate::defense::{ArmorTable, DefenseStats};
use crate::formula::{FormulaError, FormulaSpec};
use crate::types::{DamageType, DefenseType, GridPosition, Pool, TargetId, WeaponType};
use serde::{Deserialize, Serialize};

/// Snapshot of a weapon at the moment it is used
///
/// Loaded from TOML presets or copied from the caller's item state. A new
/// snapshot is taken for every use; resolution never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponProfile {
    /// Unique weapon identifier
    #[serde(default)]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub weapon_type: WeaponType,
    #[serde(default)]
    pub damage_type: DamageType,
    /// Damage dice for a single attack, e.g. `2d6 + 1`
    pub damage_formula: String,

    // === Attack group ===
    /// Shots or strikes made with one use
    #[serde(default = "default_number_of_attacks")]
    pub number_of_attacks: u32,
    #[serde(default)]
    pub attack_bonus: i32,
    #[serde(default)]
    pub armor_penetration: u32,
    /// Base range; 0 disables range falloff
    #[serde(default)]
    pub range: u32,

    // === Costs ===
    #[serde(default)]
    pub power_cost: u32,
    #[serde(default)]
    pub capacity: Capacity,
}

fn default_number_of_attacks() -> u32 {
    1
}

impl WeaponProfile {
    /// A weapon with default stats and the given damage dice
    pub fn new(name: impl Into<String>, weapon_type: WeaponType, damage_formula: impl Into<String>) -> Self {
        let name = name.into();
        WeaponProfile {
            id: name.to_lowercase().replace(' ', "_"),
            name,
            weapon_type,
            damage_type: DamageType::default(),
            damage_formula: damage_formula.into(),
            number_of_attacks: default_number_of_attacks(),
            attack_bonus: 0,
            armor_penetration: 0,
            range: 0,
            power_cost: 0,
            capacity: Capacity::Unlimited,
        }
    }

    /// Number of attacks, never less than one
    pub fn attack_count(&self) -> u32 {
        self.number_of_attacks.max(1)
    }

    /// Whether range falloff applies to this weapon
    pub fn uses_range(&self) -> bool {
        self.weapon_type == WeaponType::Ranged && self.range > 0
    }

    /// Parse the damage dice without rolling them
    pub fn damage_dice(&self) -> Result<FormulaSpec, FormulaError> {
        FormulaSpec::parse(&self.damage_formula)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct CapacityPool {
    value: u32,
    max: u32,
}

/// Ammunition or charges a weapon holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<CapacityPool>", into = "Option<CapacityPool>")]
pub enum Capacity {
    #[default]
    Unlimited,
    Limited { value: u32, max: u32 },
}

impl Capacity {
    pub fn limited(value: u32, max: u32) -> Self {
        Capacity::Limited { value, max }
    }

    /// Remaining uses, `None` when unlimited
    pub fn remaining(&self) -> Option<u32> {
        match self {
            Capacity::Unlimited => None,
            Capacity::Limited { value, .. } => Some(*value),
        }
    }
}

impl From<Option<CapacityPool>> for Capacity {
    fn from(pool: Option<CapacityPool>) -> Self {
        match pool {
            Some(CapacityPool { value, max }) => Capacity::Limited { value, max },
            None => Capacity::Unlimited,
        }
    }
}

impl From<Capacity> for Option<CapacityPool> {
    fn from(capacity: Capacity) -> Self {
        match capacity {
            Capacity::Unlimited => None,
            Capacity::Limited { value, max } => Some(CapacityPool { value, max }),
        }
    }
}

/// Snapshot of the attacking unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackerProfile {
    /// Ranged attack stat
    #[serde(default)]
    pub aim: i32,
    /// Melee attack stat
    #[serde(default)]
    pub melee: i32,
    #[serde(default)]
    pub power: Pool,
    /// Absent when the attack is made without a token on the grid
    #[serde(default)]
    pub position: Option<GridPosition>,
}

impl AttackerProfile {
    /// The stat added to the to-hit roll for a weapon type
    pub fn attack_stat(&self, weapon_type: WeaponType) -> i32 {
        match weapon_type {
            WeaponType::Ranged => self.aim,
            WeaponType::Melee => self.melee,
        }
    }
}

/// Snapshot of one target of an attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetProfile {
    pub id: TargetId,
    /// Total defense, rolled against by melee attacks
    #[serde(default)]
    pub defense: Option<i32>,
    /// Total profile, rolled against by ranged attacks
    #[serde(default)]
    pub profile: Option<i32>,
    #[serde(default)]
    pub armor: ArmorTable,
    #[serde(default)]
    pub position: Option<GridPosition>,
}

impl TargetProfile {
    /// A target with no stats filled in yet
    pub fn new(id: impl Into<TargetId>) -> Self {
        TargetProfile {
            id: id.into(),
            defense: None,
            profile: None,
            armor: ArmorTable::new(),
            position: None,
        }
    }

    /// Fill defense and profile from a unit's defensive stats
    pub fn with_stats(mut self, stats: &DefenseStats) -> Self {
        self.defense = Some(stats.defense_total());
        self.profile = Some(stats.profile_total());
        self
    }

    pub fn with_armor(mut self, armor: ArmorTable) -> Self {
        self.armor = armor;
        self
    }

    pub fn at(mut self, position: GridPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn defense_value(&self, defense_type: DefenseType) -> Option<i32> {
        match defense_type {
            DefenseType::Profile => self.profile,
            DefenseType::Defense => self.defense,
        }
    }
}
