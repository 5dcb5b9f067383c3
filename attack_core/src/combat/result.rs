//! AttackOutcome - everything an attack produced, for display and persistence

use super::apply::DamageInstance;
use super::error::InvalidTargetError;
use crate::dice::RollOutcome;
use crate::formula::DamageRollResult;
use crate::types::{TargetId, WeaponType};
use serde::{Deserialize, Serialize};

/// Result of one attack against one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackResult {
    pub target: TargetId,
    pub is_hit: bool,

    // === Defense ===
    /// Defense or profile after the range modifier
    pub effective_defense: i32,
    /// Breakdown such as `6[Profile] + 4[Range Modifier]`
    pub defense_formula: String,
    /// Distance to the target; 0 for melee
    pub distance: u32,

    // === Damage ===
    /// Damage after armor; computed even on a miss
    pub damage_dealt: u32,
    /// Reduction armor provided across all attacks
    pub damage_reduction: u32,
    /// Whether armor pushed damage down to the per-attack floor
    pub is_minimum_damage: bool,
    /// Breakdown such as `12[Damage] - 3[Shots] * 2[Armor]`
    pub damage_formula: String,
}

/// Resource values after the attack, for the caller to persist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDeltas {
    /// Weapon capacity after the attack, if it changed
    pub ammo: Option<u32>,
    /// Attacker power after the attack, if the weapon costs power
    pub power: Option<i32>,
}

impl ResourceDeltas {
    pub fn is_empty(&self) -> bool {
        self.ammo.is_none() && self.power.is_none()
    }
}

/// Warnings for the caller to display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeFlags {
    /// The weapon has no capacity left
    pub out_of_ammo: bool,
    /// The attacker did not have enough power
    pub insufficient_power: bool,
}

/// Outcome of one weapon attack against all of its targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub weapon_type: WeaponType,
    pub number_of_attacks: u32,
    pub armor_penetration: u32,

    // === Rolls ===
    pub attack_roll: RollOutcome,
    pub damage_roll: DamageRollResult,

    // === Targets ===
    /// One entry per valid target, in target order
    pub results: Vec<AttackResult>,
    /// Targets that could not be evaluated
    pub rejected: Vec<InvalidTargetError>,

    // === Costs ===
    pub resource_deltas: ResourceDeltas,
    pub flags: OutcomeFlags,
}

impl AttackOutcome {
    pub fn attack_total(&self) -> i32 {
        self.attack_roll.total
    }

    pub fn result_for(&self, target: &TargetId) -> Option<&AttackResult> {
        self.results.iter().find(|r| &r.target == target)
    }

    /// Results of targets that were hit
    pub fn hits(&self) -> impl Iterator<Item = &AttackResult> {
        self.results.iter().filter(|r| r.is_hit)
    }

    /// Armor penetration across the whole attack group
    pub fn total_armor_penetration(&self) -> u32 {
        self.number_of_attacks.saturating_mul(self.armor_penetration)
    }

    /// Unmitigated damage, for applying to a unit that was not targeted
    pub fn damage_instance(&self) -> DamageInstance {
        DamageInstance {
            total: self.damage_roll.total.max(0) as u32,
            damage_type: self.damage_roll.damage_type,
            number_of_attacks: self.number_of_attacks,
            armor_penetration: self.armor_penetration,
            is_final: false,
        }
    }

    /// Already-mitigated damage for a resolved target
    pub fn damage_instance_for(&self, target: &TargetId) -> Option<DamageInstance> {
        self.result_for(target)
            .map(|r| DamageInstance::final_damage(r.damage_dealt, self.damage_roll.damage_type))
    }

    /// Short human-readable summary
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "attack {} / {} {} damage",
            self.attack_total(),
            self.damage_roll.total,
            self.damage_roll.damage_type
        )];

        for result in &self.results {
            if result.is_hit {
                parts.push(format!("{} hit for {}", result.target, result.damage_dealt));
            } else {
                parts.push(format!("{} missed", result.target));
            }
        }

        if !self.rejected.is_empty() {
            parts.push(format!("{} skipped", self.rejected.len()));
        }
        if self.flags.out_of_ammo {
            parts.push("OUT OF AMMO".to_string());
        }
        if self.flags.insufficient_power {
            parts.push("INSUFFICIENT POWER".to_string());
        }

        parts.join(", ")
    }

    /// Serialize for storage alongside a chat message or log entry
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restore an outcome stored with [`AttackOutcome::to_json`]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
