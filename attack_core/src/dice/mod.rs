//! Dice evaluation - the service that turns formula text into numbers
//!
//! The attack core never rolls dice itself. It hands formula text to a
//! [`DiceService`], which may be local ([`RngDiceService`]) or backed by a
//! remote random source.

mod outcome;
mod rng;

pub use outcome::{DieResult, RollOutcome, TermOutcome};
pub use rng::{roll_formula_with_rng, RngDiceService, MAX_EXPLOSIONS};

use crate::formula::FormulaError;
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a dice service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiceServiceError {
    #[error("Dice service could not parse formula: {0}")]
    Formula(#[from] FormulaError),
    #[error("Dice backend failure: {0}")]
    Backend(String),
}

/// Evaluates dice formulas
///
/// Given a fixed seed an implementation must be deterministic; otherwise any
/// game-quality PRNG is acceptable.
#[async_trait]
pub trait DiceService: Send + Sync {
    /// Roll `formula` and return its total with a per-term breakdown
    async fn evaluate(&self, formula: &str) -> Result<RollOutcome, DiceServiceError>;
}

#[async_trait]
impl<T: DiceService + ?Sized> DiceService for &T {
    async fn evaluate(&self, formula: &str) -> Result<RollOutcome, DiceServiceError> {
        (**self).evaluate(formula).await
    }
}

#[async_trait]
impl<T: DiceService + ?Sized> DiceService for std::sync::Arc<T> {
    async fn evaluate(&self, formula: &str) -> Result<RollOutcome, DiceServiceError> {
        (**self).evaluate(formula).await
    }
}
