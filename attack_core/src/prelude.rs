//! Prelude module for convenient imports
//!
//! ```rust
//! use attack_core::prelude::*;
//! ```

// Core types
pub use crate::types::{CriticalRule, DamageType, DefenseType, GridPosition, Pool, TargetId, WeaponType};

// Formulas and dice
pub use crate::dice::{DiceService, RngDiceService, RollOutcome};
pub use crate::formula::{build_damage_formula, DamageFormula, FormulaSpec};

// Combat
pub use crate::combat::{AttackOutcome, AttackResolver, AttackerProfile, TargetProfile, WeaponProfile};
pub use crate::defense::{ArmorTable, DefenseStats};
pub use crate::grid::{GridMeasure, SquareGrid};

// Config
pub use crate::config::{default_rules, default_weapons, RulesConstants};
