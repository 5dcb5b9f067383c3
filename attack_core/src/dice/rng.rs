//! RngDiceService - local dice evaluation backed by a ChaCha RNG

use super::outcome::{DieResult, RollOutcome, TermOutcome};
use super::{DiceService, DiceServiceError};
use crate::formula::{DieTerm, FormulaError, FormulaSpec, Term, MAX_DICE};
use async_trait::async_trait;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;

/// Upper bound on explosions within one die term
///
/// A `d1` with `x` would otherwise never stop rolling.
pub const MAX_EXPLOSIONS: u32 = 1000;

/// Dice service that rolls locally
///
/// Use [`RngDiceService::seeded`] for reproducible rolls in tests and replays.
#[derive(Debug)]
pub struct RngDiceService {
    rng: Mutex<ChaCha8Rng>,
}

impl RngDiceService {
    /// Create a service seeded from OS entropy
    pub fn new() -> Self {
        RngDiceService {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Create a deterministic service
    pub fn seeded(seed: u64) -> Self {
        RngDiceService {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Roll an already parsed formula
    pub fn roll_formula(&self, formula: &FormulaSpec) -> Result<RollOutcome, DiceServiceError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| DiceServiceError::Backend("dice RNG lock poisoned".to_string()))?;
        Ok(roll_formula_with_rng(formula, &mut *rng)?)
    }
}

impl Default for RngDiceService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DiceService for RngDiceService {
    async fn evaluate(&self, formula: &str) -> Result<RollOutcome, DiceServiceError> {
        let parsed = FormulaSpec::parse(formula)?;
        self.roll_formula(&parsed)
    }
}

/// Roll a formula with a provided RNG
///
/// Checks [`MAX_DICE`] first; formulas built with `from_terms` skip the parser.
pub fn roll_formula_with_rng(formula: &FormulaSpec, rng: &mut impl Rng) -> Result<RollOutcome, FormulaError> {
    formula.check_dice_limit()?;
    let mut total: i64 = 0;
    let mut terms = Vec::with_capacity(formula.terms().len());

    for signed in formula.terms() {
        let outcome = match &signed.term {
            Term::Die(die) => {
                let (results, sum) = roll_die_term(die, rng);
                TermOutcome::Dice {
                    expression: die.to_string(),
                    results,
                    total: clamp_i32(signed.operator.apply(sum)),
                }
            }
            Term::Numeric(num) => TermOutcome::Numeric {
                value: clamp_i32(signed.operator.apply(num.value as i64)),
                flavor: num.flavor.clone(),
            },
        };
        total += outcome.total() as i64;
        terms.push(outcome);
    }

    Ok(RollOutcome {
        formula: formula.to_string(),
        total: clamp_i32(total),
        terms,
    })
}

fn roll_die_term(die: &DieTerm, rng: &mut impl Rng) -> (Vec<DieResult>, i64) {
    let mut results = Vec::with_capacity(die.number.min(MAX_DICE) as usize);
    let mut sum: i64 = 0;
    let mut explosions = 0u32;

    for _ in 0..die.number {
        let mut value = rng.gen_range(1..=die.faces);
        let mut chain = 0u32;
        loop {
            let may_explode = (die.explodes_unbounded() || (die.explodes_once() && chain == 0))
                && explosions < MAX_EXPLOSIONS;
            let exploded = may_explode && value == die.faces;
            results.push(DieResult { value, exploded });
            sum += value as i64;
            if !exploded {
                break;
            }
            explosions += 1;
            chain += 1;
            value = rng.gen_range(1..=die.faces);
        }
    }

    if explosions > 0 {
        tracing::trace!(term = %die, explosions, "dice exploded");
    }
    (results, sum)
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
