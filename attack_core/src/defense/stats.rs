//! Defense and profile totals of a unit

use crate::types::DefenseType;
use serde::{Deserialize, Serialize};

/// A unit's raw defensive stats
///
/// Profile is what ranged attacks roll against, defense what melee attacks
/// roll against. Melee skill also makes a unit harder to hit in melee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefenseStats {
    #[serde(default = "default_profile_base")]
    pub profile_base: i32,
    #[serde(default = "default_defense_base")]
    pub defense_base: i32,
    #[serde(default)]
    pub melee: i32,
    /// Bonus from the unit's current stance
    #[serde(default)]
    pub profile_stance_bonus: i32,
    #[serde(default)]
    pub defense_stance_bonus: i32,
    #[serde(default)]
    pub profile_misc_bonus: i32,
    #[serde(default)]
    pub defense_misc_bonus: i32,
}

fn default_profile_base() -> i32 {
    6
}

fn default_defense_base() -> i32 {
    11
}

impl Default for DefenseStats {
    fn default() -> Self {
        DefenseStats {
            profile_base: default_profile_base(),
            defense_base: default_defense_base(),
            melee: 0,
            profile_stance_bonus: 0,
            defense_stance_bonus: 0,
            profile_misc_bonus: 0,
            defense_misc_bonus: 0,
        }
    }
}

impl DefenseStats {
    pub fn profile_total(&self) -> i32 {
        self.profile_base + self.profile_stance_bonus + self.profile_misc_bonus
    }

    pub fn defense_total(&self) -> i32 {
        self.defense_base + self.defense_stance_bonus + self.melee + self.defense_misc_bonus
    }

    pub fn total(&self, defense_type: DefenseType) -> i32 {
        match defense_type {
            DefenseType::Profile => self.profile_total(),
            DefenseType::Defense => self.defense_total(),
        }
    }
}
