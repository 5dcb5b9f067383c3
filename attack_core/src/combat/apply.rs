//! Damage application - turning damage into a health change

use crate::defense::{apply_armor, ArmorTable};
use crate::types::DamageType;
use serde::{Deserialize, Serialize};

/// Damage about to be applied to a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageInstance {
    pub total: u32,
    #[serde(default)]
    pub damage_type: DamageType,
    /// Attacks the damage was rolled for; scales armor and the floor
    #[serde(default = "default_number_of_attacks")]
    pub number_of_attacks: u32,
    #[serde(default)]
    pub armor_penetration: u32,
    /// Final damage has already been mitigated and skips armor
    #[serde(default)]
    pub is_final: bool,
}

fn default_number_of_attacks() -> u32 {
    1
}

impl DamageInstance {
    /// Damage that still has to go through the target's armor
    pub fn raw(total: u32, damage_type: DamageType) -> Self {
        DamageInstance {
            total,
            damage_type,
            number_of_attacks: default_number_of_attacks(),
            armor_penetration: 0,
            is_final: false,
        }
    }

    /// Damage that is applied as-is
    pub fn final_damage(total: u32, damage_type: DamageType) -> Self {
        DamageInstance {
            is_final: true,
            ..Self::raw(total, damage_type)
        }
    }
}

/// Health before and after damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthChange {
    pub health_before: i32,
    pub health_after: i32,
    pub damage_taken: u32,
    pub is_killing_blow: bool,
}

/// Apply damage to a unit's current health
///
/// Health never drops below 0.
pub fn apply_damage(current_health: i32, armor: &ArmorTable, damage: &DamageInstance) -> HealthChange {
    let damage_taken = if damage.is_final {
        damage.total
    } else {
        apply_armor(
            damage.total,
            armor.get(damage.damage_type),
            damage.armor_penetration,
            damage.number_of_attacks.max(1),
        )
        .damage_dealt
    };

    let taken = i32::try_from(damage_taken).unwrap_or(i32::MAX);
    let health_after = current_health.saturating_sub(taken).max(0);

    HealthChange {
        health_before: current_health,
        health_after,
        damage_taken,
        is_killing_blow: current_health > 0 && health_after == 0,
    }
}
