//! RollOutcome - what a dice service returns

use serde::{Deserialize, Serialize};

/// Result of evaluating one formula
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The formula text that was rolled
    pub formula: String,
    /// Signed sum of all terms
    pub total: i32,
    /// Per-term breakdown, in formula order
    pub terms: Vec<TermOutcome>,
}

impl RollOutcome {
    /// All individual die results, across terms
    pub fn die_results(&self) -> impl Iterator<Item = &DieResult> {
        self.terms.iter().flat_map(|t| match t {
            TermOutcome::Dice { results, .. } => results.iter(),
            TermOutcome::Numeric { .. } => [].iter(),
        })
    }

    /// Number of dice that exploded
    pub fn explosions(&self) -> usize {
        self.die_results().filter(|r| r.exploded).count()
    }
}

/// Outcome of a single formula term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TermOutcome {
    Dice {
        /// Term text, e.g. `2d6x`
        expression: String,
        results: Vec<DieResult>,
        /// Signed contribution to the roll total
        total: i32,
    },
    Numeric {
        /// Signed contribution to the roll total
        value: i32,
        #[serde(default)]
        flavor: Option<String>,
    },
}

impl TermOutcome {
    pub fn total(&self) -> i32 {
        match self {
            TermOutcome::Dice { total, .. } => *total,
            TermOutcome::Numeric { value, .. } => *value,
        }
    }
}

/// A single die face that was rolled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    pub value: u32,
    /// Whether this result triggered an extra roll
    pub exploded: bool,
}
