//! FormulaSpec - an unevaluated, immutable dice formula

use super::error::FormulaError;
use super::parser::parse_terms;
use super::term::{DieTerm, Operator, SignedTerm, Term, MAX_DICE};
use crate::types::CriticalRule;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed dice formula that has not been rolled yet
///
/// All transformations return a new formula; the only way to get a number out of
/// a formula is to hand its text to a [`DiceService`](crate::dice::DiceService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FormulaSpec {
    terms: Vec<SignedTerm>,
}

impl FormulaSpec {
    /// Parse a formula such as `2d6 + 3`
    pub fn parse(formula: &str) -> Result<Self, FormulaError> {
        Ok(FormulaSpec {
            terms: parse_terms(formula)?,
        })
    }

    /// Build a formula from already constructed terms
    pub fn from_terms(terms: Vec<SignedTerm>) -> Result<Self, FormulaError> {
        if terms.is_empty() {
            return Err(FormulaError::Empty);
        }
        Ok(FormulaSpec { terms })
    }

    /// The to-hit formula: `1d20 + bonus[Attack Bonus] + stat[<stat label>]`
    pub fn attack_roll(attack_bonus: i32, stat: i32, stat_label: &str) -> Self {
        FormulaSpec {
            terms: vec![
                SignedTerm::add(Term::Die(DieTerm::new(1, 20))),
                SignedTerm::signed_number(attack_bonus, Some("Attack Bonus")),
                SignedTerm::signed_number(stat, Some(stat_label)),
            ],
        }
    }

    pub fn terms(&self) -> &[SignedTerm] {
        &self.terms
    }

    /// Iterate over the die terms only
    pub fn dice(&self) -> impl Iterator<Item = &DieTerm> {
        self.terms.iter().filter_map(|t| match &t.term {
            Term::Die(die) => Some(die),
            Term::Numeric(_) => None,
        })
    }

    /// Enforce a critical rule on every die term
    ///
    /// The rule's modifier replaces whatever modifiers a die carried. Flat
    /// numbers are untouched, and `CriticalRule::None` leaves the formula as is.
    pub fn with_critical_rule(&self, rule: CriticalRule) -> Self {
        let Some(modifier) = rule.modifier() else {
            return self.clone();
        };

        let mut formula = self.clone();
        for signed in &mut formula.terms {
            if let Term::Die(die) = &mut signed.term {
                die.modifiers = vec![modifier];
            }
        }
        formula
    }

    /// Multiply die counts and flat numbers by `attacks`
    ///
    /// `2d6 + 3` scaled by 3 becomes `6d6 + 9`; die sizes never change. Fails
    /// when a die term would exceed [`MAX_DICE`] or a number overflows.
    pub fn scaled(&self, attacks: u32) -> Result<Self, FormulaError> {
        if attacks <= 1 {
            return Ok(self.clone());
        }

        let mut formula = self.clone();
        for signed in &mut formula.terms {
            match &mut signed.term {
                Term::Die(die) => {
                    die.number = die.number.checked_mul(attacks).ok_or_else(|| {
                        FormulaError::TooManyDice {
                            term: die.to_string(),
                            limit: MAX_DICE,
                        }
                    })?;
                    die.check_dice_limit()?;
                }
                Term::Numeric(num) => {
                    num.value = num.value.checked_mul(attacks).ok_or_else(|| {
                        FormulaError::NumberOutOfRange {
                            formula: self.to_string(),
                            digits: format!("{} * {}", num.value, attacks),
                        }
                    })?;
                }
            }
        }
        Ok(formula)
    }

    /// Reject formulas with a die term above [`MAX_DICE`]
    pub fn check_dice_limit(&self) -> Result<(), FormulaError> {
        self.dice().try_for_each(DieTerm::check_dice_limit)
    }

    /// Lowest possible total, `None` if a subtracted die can explode forever
    pub fn min_total(&self) -> Option<i64> {
        self.terms.iter().try_fold(0i64, |acc, signed| {
            let bound = match signed.operator {
                Operator::Add => signed.term.min_total(),
                Operator::Subtract => -signed.term.max_total()?,
            };
            Some(acc + bound)
        })
    }

    /// Highest possible total, `None` if an added die can explode forever
    pub fn max_total(&self) -> Option<i64> {
        self.terms.iter().try_fold(0i64, |acc, signed| {
            let bound = match signed.operator {
                Operator::Add => signed.term.max_total()?,
                Operator::Subtract => -signed.term.min_total(),
            };
            Some(acc + bound)
        })
    }
}

impl fmt::Display for FormulaSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, signed) in self.terms.iter().enumerate() {
            match (i, signed.operator) {
                (0, Operator::Add) => {}
                (0, Operator::Subtract) => f.write_str("-")?,
                (_, Operator::Add) => f.write_str(" + ")?,
                (_, Operator::Subtract) => f.write_str(" - ")?,
            }
            write!(f, "{}", signed.term)?;
        }
        Ok(())
    }
}

impl FromStr for FormulaSpec {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormulaSpec::parse(s)
    }
}

impl TryFrom<String> for FormulaSpec {
    type Error = FormulaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FormulaSpec::parse(&value)
    }
}

impl From<FormulaSpec> for String {
    fn from(formula: FormulaSpec) -> Self {
        formula.to_string()
    }
}
