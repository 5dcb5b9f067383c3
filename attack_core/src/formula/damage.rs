//! DamageFormula - a weapon's damage dice, ready to be rolled

use super::error::FormulaError;
use super::expression::FormulaSpec;
use crate::dice::{DiceService, DiceServiceError, TermOutcome};
use crate::types::{CriticalRule, DamageType};
use serde::{Deserialize, Serialize};

/// Build the damage formula for one weapon use
///
/// The critical rule is enforced on every die term and, when
/// `number_of_attacks > 1`, die counts and flat numbers are multiplied by it.
pub fn build_damage_formula(
    base_formula: &str,
    damage_type: DamageType,
    number_of_attacks: u32,
    critical_rule: CriticalRule,
) -> Result<DamageFormula, FormulaError> {
    let expression = FormulaSpec::parse(base_formula)?;
    DamageFormula::new(expression, damage_type, critical_rule).scaled(number_of_attacks)
}

/// Unevaluated damage dice with their damage type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageFormula {
    expression: FormulaSpec,
    damage_type: DamageType,
}

impl DamageFormula {
    /// Wrap a formula, enforcing `critical_rule` on its dice
    pub fn new(expression: FormulaSpec, damage_type: DamageType, critical_rule: CriticalRule) -> Self {
        DamageFormula {
            expression: expression.with_critical_rule(critical_rule),
            damage_type,
        }
    }

    /// Scale for a group of `attacks` attacks
    pub fn scaled(self, attacks: u32) -> Result<Self, FormulaError> {
        Ok(DamageFormula {
            expression: self.expression.scaled(attacks)?,
            damage_type: self.damage_type,
        })
    }

    pub fn expression(&self) -> &FormulaSpec {
        &self.expression
    }

    pub fn damage_type(&self) -> DamageType {
        self.damage_type
    }

    /// The formula text as sent to the dice service
    pub fn formula(&self) -> String {
        self.expression.to_string()
    }

    /// Roll the formula, freezing the result
    pub async fn evaluate<D>(&self, dice: &D) -> Result<DamageRollResult, DiceServiceError>
    where
        D: DiceService + ?Sized,
    {
        let outcome = dice.evaluate(&self.formula()).await?;
        Ok(DamageRollResult {
            total: outcome.total.max(0),
            damage_type: self.damage_type,
            formula: outcome.formula,
            terms: outcome.terms,
        })
    }
}

/// A rolled damage formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRollResult {
    /// Sum of all dice and modifiers, never below 0
    pub total: i32,
    pub damage_type: DamageType,
    /// Human readable formula that was rolled
    pub formula: String,
    /// Raw per-term outcomes, for display
    pub terms: Vec<TermOutcome>,
}
