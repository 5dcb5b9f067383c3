//! Core types shared by formulas, defenses and attack resolution

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a weapon delivers its attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    #[default]
    Ranged,
    Melee,
}

impl WeaponType {
    /// The defense stat an attack of this type is rolled against
    pub fn defense_type(&self) -> DefenseType {
        match self {
            WeaponType::Ranged => DefenseType::Profile,
            WeaponType::Melee => DefenseType::Defense,
        }
    }

    /// Label for a single attack in a multi-attack group
    pub fn attack_label(&self) -> &'static str {
        match self {
            WeaponType::Ranged => "Shots",
            WeaponType::Melee => "Strikes",
        }
    }

    /// Label of the attacker stat added to the to-hit roll
    pub fn stat_label(&self) -> &'static str {
        match self {
            WeaponType::Ranged => "Aim",
            WeaponType::Melee => "Melee",
        }
    }
}

/// The two "difficulty to hit" stats of a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseType {
    /// Used against ranged attacks
    Profile,
    /// Used against melee attacks
    Defense,
}

impl DefenseType {
    pub fn label(&self) -> &'static str {
        match self {
            DefenseType::Profile => "Profile",
            DefenseType::Defense => "Defense",
        }
    }
}

impl fmt::Display for DefenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Damage types used for armor lookup and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    #[default]
    Untyped,
    Energy,
    Explosive,
    Ballistic,
    Piercing,
    Slashing,
    Crushing,
    Fire,
    Gravity,
    Bleeding,
    Toxic,
    Radiation,
    Magic,
    Psi,
    Holy,
    Unholy,
    /// Ignores armor entirely
    True,
}

impl DamageType {
    /// Every damage type that armor can be rated against
    pub fn armored() -> &'static [DamageType] {
        &[
            DamageType::Untyped,
            DamageType::Energy,
            DamageType::Explosive,
            DamageType::Ballistic,
            DamageType::Piercing,
            DamageType::Slashing,
            DamageType::Crushing,
            DamageType::Fire,
            DamageType::Gravity,
            DamageType::Bleeding,
            DamageType::Toxic,
            DamageType::Radiation,
            DamageType::Magic,
            DamageType::Psi,
            DamageType::Holy,
            DamageType::Unholy,
        ]
    }

    /// Whether armor can mitigate this damage type
    pub fn is_armored(&self) -> bool {
        !matches!(self, DamageType::True)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DamageType::Untyped => "Untyped",
            DamageType::Energy => "Energy",
            DamageType::Explosive => "Explosive",
            DamageType::Ballistic => "Ballistic",
            DamageType::Piercing => "Piercing",
            DamageType::Slashing => "Slashing",
            DamageType::Crushing => "Crushing",
            DamageType::Fire => "Fire",
            DamageType::Gravity => "Gravity",
            DamageType::Bleeding => "Bleeding",
            DamageType::Toxic => "Toxic",
            DamageType::Radiation => "Radiation",
            DamageType::Magic => "Magic",
            DamageType::Psi => "Psi",
            DamageType::Holy => "Holy",
            DamageType::Unholy => "Unholy",
            DamageType::True => "True",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// World setting controlling how damage dice explode on their maximum face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalRule {
    /// Re-roll and add on every maximum result
    #[default]
    Unlimited,
    /// Re-roll and add at most once per die
    Limited,
    /// Dice never explode
    None,
}

/// Opaque handle identifying a target to the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub String);

impl From<&str> for TargetId {
    fn from(s: &str) -> Self {
        TargetId(s.to_string())
    }
}

impl From<String> for TargetId {
    fn from(s: String) -> Self {
        TargetId(s)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A square on the battle grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        GridPosition { x, y }
    }
}

/// A current/maximum resource pair (power, health)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pool {
    pub value: i32,
    pub max: i32,
    /// Whether the unit tracks this resource at all
    #[serde(default = "default_is_used")]
    pub is_used: bool,
}

fn default_is_used() -> bool {
    true
}

impl Pool {
    pub fn new(value: i32, max: i32) -> Self {
        Pool {
            value,
            max,
            is_used: true,
        }
    }
}
