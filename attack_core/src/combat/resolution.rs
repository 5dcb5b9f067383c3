//! Attack resolution - roll a weapon attack and evaluate every target

use super::error::{AttackError, InvalidTargetError};
use super::profile::{AttackerProfile, Capacity, TargetProfile, WeaponProfile};
use super::result::{AttackOutcome, AttackResult, OutcomeFlags, ResourceDeltas};
use crate::config::RulesConstants;
use crate::defense::{apply_armor, calculate_range_modifier};
use crate::dice::DiceService;
use crate::formula::{build_damage_formula, DamageRollResult, FormulaSpec};
use crate::grid::GridMeasure;
use tracing::{debug, warn};

/// Resolves weapon attacks against injected dice and grid services
///
/// Holds no state between calls; every `resolve_attack` is independent.
pub struct AttackResolver<'a, D: ?Sized, G: ?Sized> {
    dice: &'a D,
    grid: &'a G,
    rules: &'a RulesConstants,
}

impl<'a, D, G> AttackResolver<'a, D, G>
where
    D: DiceService + ?Sized,
    G: GridMeasure + ?Sized,
{
    pub fn new(dice: &'a D, grid: &'a G, rules: &'a RulesConstants) -> Self {
        AttackResolver { dice, grid, rules }
    }

    /// Resolve one weapon use against zero or more targets
    ///
    /// 1. Parses the damage formula, failing before any dice are rolled
    /// 2. Rolls the to-hit and damage rolls once, concurrently
    /// 3. Evaluates each target against both rolls (targets with missing
    ///    stats are reported in `rejected` and skipped)
    /// 4. Reports ammo and power changes without applying them
    ///
    /// An attack with no targets still rolls and still costs resources.
    pub async fn resolve_attack(
        &self,
        attacker: &AttackerProfile,
        weapon: &WeaponProfile,
        targets: &[TargetProfile],
    ) -> Result<AttackOutcome, AttackError> {
        let attacks = weapon.attack_count();
        let damage_formula = build_damage_formula(
            &weapon.damage_formula,
            weapon.damage_type,
            attacks,
            self.rules.critical_rule,
        )
        .map_err(|source| AttackError::InvalidWeapon {
            weapon: weapon.name.clone(),
            source,
        })?;
        let attack_formula = attack_formula(attacker, weapon).to_string();

        let (attack_roll, damage_roll) = tokio::try_join!(
            self.dice.evaluate(&attack_formula),
            damage_formula.evaluate(self.dice),
        )?;
        debug!(
            weapon = %weapon.name,
            attack = attack_roll.total,
            damage = damage_roll.total,
            damage_type = %damage_roll.damage_type,
            targets = targets.len(),
            "attack rolled"
        );

        let mut results = Vec::with_capacity(targets.len());
        let mut rejected = Vec::new();
        for target in targets {
            let distance = if weapon.uses_range() {
                self.grid.measure_distance(attacker.position, target.position)
            } else {
                0
            };

            match evaluate_target(
                weapon,
                target,
                attack_roll.total,
                &damage_roll,
                distance,
                self.rules.range_penalty,
            ) {
                Ok(result) => {
                    debug!(
                        target = %result.target,
                        hit = result.is_hit,
                        defense = result.effective_defense,
                        damage = result.damage_dealt,
                        "target evaluated"
                    );
                    results.push(result);
                }
                Err(err) => {
                    warn!("skipping target: {}", err);
                    rejected.push(err);
                }
            }
        }

        let (resource_deltas, flags) = resource_usage(attacker, weapon);

        Ok(AttackOutcome {
            weapon_type: weapon.weapon_type,
            number_of_attacks: attacks,
            armor_penetration: weapon.armor_penetration,
            attack_roll,
            damage_roll,
            results,
            rejected,
            resource_deltas,
            flags,
        })
    }
}

/// The to-hit formula for an attacker using a weapon
pub fn attack_formula(attacker: &AttackerProfile, weapon: &WeaponProfile) -> FormulaSpec {
    FormulaSpec::attack_roll(
        weapon.attack_bonus,
        attacker.attack_stat(weapon.weapon_type),
        weapon.weapon_type.stat_label(),
    )
}

/// Evaluate a single target against already rolled attack and damage
///
/// Pure: reads only the target, the weapon and the two rolls, so targets can
/// be evaluated in any order. Damage is computed even when the attack misses.
pub fn evaluate_target(
    weapon: &WeaponProfile,
    target: &TargetProfile,
    attack_total: i32,
    damage: &DamageRollResult,
    distance: u32,
    range_penalty: u32,
) -> Result<AttackResult, InvalidTargetError> {
    let defense_type = weapon.weapon_type.defense_type();
    let base_defense = target
        .defense_value(defense_type)
        .ok_or_else(|| InvalidTargetError::MissingDefense {
            target: target.id.clone(),
            defense_type,
        })?;

    // Range falloff raises the target's defense rather than lowering the roll
    let mut effective_defense = base_defense;
    let mut defense_formula = format!("{}[{}]", base_defense, defense_type.label());
    let distance = if weapon.uses_range() { distance } else { 0 };
    if weapon.uses_range() {
        let range_modifier = calculate_range_modifier(distance, weapon.range, range_penalty);
        if range_modifier > 0 {
            effective_defense = effective_defense.saturating_add(range_modifier as i32);
            defense_formula.push_str(&format!(" + {}[Range Modifier]", range_modifier));
        }
    }

    let attacks = weapon.attack_count();
    let damage_total = damage.total.max(0) as u32;
    let mitigation = apply_armor(
        damage_total,
        target.armor.get(damage.damage_type),
        weapon.armor_penetration,
        attacks,
    );

    Ok(AttackResult {
        target: target.id.clone(),
        is_hit: attack_total >= effective_defense,
        effective_defense,
        defense_formula,
        distance,
        damage_dealt: mitigation.damage_dealt,
        damage_reduction: mitigation.damage_reduction,
        is_minimum_damage: mitigation.is_minimum,
        damage_formula: damage_breakdown(damage_total, mitigation.armor, mitigation.damage_reduction, weapon),
    })
}

fn damage_breakdown(total: u32, armor: u32, reduction: u32, weapon: &WeaponProfile) -> String {
    let mut formula = format!("{}[Damage]", total);
    if reduction > 0 {
        let attacks = weapon.attack_count();
        let label = weapon.weapon_type.attack_label();
        if weapon.armor_penetration > 0 {
            formula.push_str(&format!(
                " - {}[{}] * ({}[Armor] - {}[Armor Penetration])",
                attacks, label, armor, weapon.armor_penetration
            ));
        } else {
            formula.push_str(&format!(" - {}[{}] * {}[Armor]", attacks, label, armor));
        }
    }
    formula
}

/// Ammo and power after one use of a weapon
///
/// Capacity drops by one while it is above 0 and is flagged once it reaches
/// 0. Power may go negative; that is flagged, not prevented.
pub fn resource_usage(attacker: &AttackerProfile, weapon: &WeaponProfile) -> (ResourceDeltas, OutcomeFlags) {
    let mut deltas = ResourceDeltas::default();
    let mut flags = OutcomeFlags::default();

    if let Capacity::Limited { value, .. } = weapon.capacity {
        if value > 0 {
            deltas.ammo = Some(value - 1);
        }
        flags.out_of_ammo = value <= 1;
    }

    if weapon.power_cost > 0 {
        let cost = i32::try_from(weapon.power_cost).unwrap_or(i32::MAX);
        let remaining = attacker.power.value.saturating_sub(cost);
        deltas.power = Some(remaining);
        flags.insufficient_power = remaining < 0;
    }

    (deltas, flags)
}
