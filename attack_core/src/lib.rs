//! attack_core - Weapon attack resolution for a tabletop combat system
//!
//! This library provides:
//! - FormulaSpec / DamageFormula: Parsed dice formulas with exploding dice
//! - DiceService: The seam where formulas are rolled
//! - AttackResolver: To-hit, range falloff and armor mitigation per target
//! - Damage application, item use and reloading

pub mod combat;
pub mod config;
pub mod defense;
pub mod dice;
pub mod formula;
pub mod grid;
pub mod prelude;
pub mod types;

// Re-export core types for convenience
pub use combat::{
    apply_damage, AttackError, AttackOutcome, AttackResolver, AttackResult, AttackerProfile,
    Capacity, DamageInstance, InvalidTargetError, TargetProfile, WeaponProfile,
};
pub use config::{default_rules, default_weapons, ConfigError, RulesConstants};
pub use defense::{apply_armor, calculate_damage_reduction, calculate_range_modifier, ArmorTable};
pub use dice::{DiceService, DiceServiceError, RngDiceService, RollOutcome};
pub use formula::{build_damage_formula, DamageFormula, DamageRollResult, FormulaError, FormulaSpec};
pub use grid::{GridMeasure, SquareGrid};
pub use types::{CriticalRule, DamageType, DefenseType, GridPosition, Pool, TargetId, WeaponType};
