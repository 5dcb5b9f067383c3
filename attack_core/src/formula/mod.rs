//! Dice formulas - parsing, critical rules, attack-count scaling
//!
//! A [`FormulaSpec`] is immutable and unevaluated. Rolling it through a
//! [`DiceService`](crate::dice::DiceService) yields a frozen result, so
//! modifiers can only ever be applied before the dice hit the table.

mod damage;
mod error;
mod expression;
mod parser;
mod term;

pub use damage::{build_damage_formula, DamageFormula, DamageRollResult};
pub use error::FormulaError;
pub use expression::FormulaSpec;
pub use term::{DieModifier, DieTerm, NumericTerm, Operator, SignedTerm, Term, MAX_DICE};
