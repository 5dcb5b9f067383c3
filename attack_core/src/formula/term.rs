//! Formula terms - dice, flat numbers and die modifiers

use super::error::FormulaError;
use crate::types::CriticalRule;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A modifier attached to a die term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DieModifier {
    /// `x` - roll again and add whenever a die shows its maximum face
    Explode,
    /// `xo` - like `x`, but each die explodes at most once
    ExplodeOnce,
}

impl DieModifier {
    pub fn symbol(&self) -> &'static str {
        match self {
            DieModifier::Explode => "x",
            DieModifier::ExplodeOnce => "xo",
        }
    }
}

impl fmt::Display for DieModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl CriticalRule {
    /// The die modifier this rule enforces on damage dice, if any
    pub fn modifier(&self) -> Option<DieModifier> {
        match self {
            CriticalRule::Unlimited => Some(DieModifier::Explode),
            CriticalRule::Limited => Some(DieModifier::ExplodeOnce),
            CriticalRule::None => None,
        }
    }
}

/// Most dice a single term may roll, after scaling
pub const MAX_DICE: u32 = 10_000;

/// `NdM` with optional modifiers and flavor text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DieTerm {
    /// Number of dice rolled
    pub number: u32,
    /// Faces per die
    pub faces: u32,
    pub modifiers: Vec<DieModifier>,
    /// Label shown as `[Label]`; any `]` is dropped on display
    pub flavor: Option<String>,
}

impl DieTerm {
    pub fn new(number: u32, faces: u32) -> Self {
        DieTerm {
            number,
            faces,
            modifiers: Vec::new(),
            flavor: None,
        }
    }

    /// Reject terms that roll more than [`MAX_DICE`] dice
    pub fn check_dice_limit(&self) -> Result<(), FormulaError> {
        if self.number > MAX_DICE {
            return Err(FormulaError::TooManyDice {
                term: self.to_string(),
                limit: MAX_DICE,
            });
        }
        Ok(())
    }

    /// Whether a die of this term explodes indefinitely
    pub fn explodes_unbounded(&self) -> bool {
        self.modifiers.contains(&DieModifier::Explode)
    }

    /// Whether a die of this term explodes at most once
    pub fn explodes_once(&self) -> bool {
        !self.explodes_unbounded() && self.modifiers.contains(&DieModifier::ExplodeOnce)
    }

    /// Lowest possible sum of this term
    pub fn min_total(&self) -> i64 {
        self.number as i64
    }

    /// Highest possible sum of this term, `None` when it can explode forever
    pub fn max_total(&self) -> Option<i64> {
        let plain = self.number as i64 * self.faces as i64;
        if self.explodes_unbounded() {
            None
        } else if self.explodes_once() {
            Some(plain * 2)
        } else {
            Some(plain)
        }
    }
}

impl fmt::Display for DieTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.number, self.faces)?;
        for modifier in &self.modifiers {
            write!(f, "{}", modifier)?;
        }
        write_flavor(f, self.flavor.as_deref())?;
        Ok(())
    }
}

/// Flavor labels end at the first `]`, so one inside a label is dropped
fn clean_flavor(flavor: &str) -> String {
    flavor.replace(']', "")
}

fn write_flavor(f: &mut fmt::Formatter<'_>, flavor: Option<&str>) -> fmt::Result {
    match flavor {
        Some(flavor) => write!(f, "[{}]", clean_flavor(flavor)),
        None => Ok(()),
    }
}

/// A flat number with optional flavor text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericTerm {
    pub value: u32,
    pub flavor: Option<String>,
}

impl NumericTerm {
    pub fn new(value: u32) -> Self {
        NumericTerm { value, flavor: None }
    }

    pub fn with_flavor(value: u32, flavor: &str) -> Self {
        NumericTerm {
            value,
            flavor: Some(clean_flavor(flavor)),
        }
    }
}

impl fmt::Display for NumericTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        write_flavor(f, self.flavor.as_deref())?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Die(DieTerm),
    Numeric(NumericTerm),
}

impl Term {
    pub fn min_total(&self) -> i64 {
        match self {
            Term::Die(die) => die.min_total(),
            Term::Numeric(num) => num.value as i64,
        }
    }

    pub fn max_total(&self) -> Option<i64> {
        match self {
            Term::Die(die) => die.max_total(),
            Term::Numeric(num) => Some(num.value as i64),
        }
    }

    pub fn flavor(&self) -> Option<&str> {
        match self {
            Term::Die(die) => die.flavor.as_deref(),
            Term::Numeric(num) => num.flavor.as_deref(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Die(die) => die.fmt(f),
            Term::Numeric(num) => num.fmt(f),
        }
    }
}

/// Arithmetic operator joining a term to the terms before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    pub fn apply(&self, value: i64) -> i64 {
        match self {
            Operator::Add => value,
            Operator::Subtract => -value,
        }
    }
}

/// A term together with the operator in front of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTerm {
    pub operator: Operator,
    pub term: Term,
}

impl SignedTerm {
    pub fn add(term: Term) -> Self {
        SignedTerm {
            operator: Operator::Add,
            term,
        }
    }

    pub fn subtract(term: Term) -> Self {
        SignedTerm {
            operator: Operator::Subtract,
            term,
        }
    }

    /// A signed flat number, using the sign of `value` for the operator
    pub fn signed_number(value: i32, flavor: Option<&str>) -> Self {
        let term = Term::Numeric(NumericTerm {
            value: value.unsigned_abs(),
            flavor: flavor.map(clean_flavor),
        });
        if value < 0 {
            SignedTerm::subtract(term)
        } else {
            SignedTerm::add(term)
        }
    }
}
