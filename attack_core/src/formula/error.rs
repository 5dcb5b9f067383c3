//! Formula parsing errors

use thiserror::Error;

/// A dice formula could not be parsed into dice and modifier terms
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("Formula is empty")]
    Empty,
    #[error("Unexpected '{found}' at position {position} in formula \"{formula}\"")]
    UnexpectedToken {
        formula: String,
        position: usize,
        found: char,
    },
    #[error("Formula \"{formula}\" ends with a dangling operator")]
    DanglingOperator { formula: String },
    #[error("Invalid die \"{term}\": a die needs at least one face")]
    InvalidDie { term: String },
    #[error("Unknown die modifier \"{modifier}\" in formula \"{formula}\"")]
    UnknownModifier { formula: String, modifier: String },
    #[error("Number \"{digits}\" in formula \"{formula}\" is out of range")]
    NumberOutOfRange { formula: String, digits: String },
    #[error("Unterminated flavor text in formula \"{formula}\"")]
    UnterminatedFlavor { formula: String },
    #[error("Die term \"{term}\" rolls more than {limit} dice")]
    TooManyDice { term: String, limit: u32 },
}
