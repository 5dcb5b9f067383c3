//! Defense system - Armor, range falloff, defense/profile stats

mod armor;
mod range;
mod stats;

pub use armor::{apply_armor, calculate_damage_reduction, ArmorBonus, ArmorMitigation, ArmorTable, ArmorTarget};
pub use range::{calculate_range_modifier, range_increments, RANGE_PENALTY_PER_INCREMENT};
pub use stats::DefenseStats;
