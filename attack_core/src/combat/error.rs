//! Attack resolution errors

use crate::dice::DiceServiceError;
use crate::formula::FormulaError;
use crate::types::{DefenseType, TargetId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An attack could not be resolved at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttackError {
    #[error("Weapon \"{weapon}\" has an invalid damage formula: {source}")]
    InvalidWeapon {
        weapon: String,
        #[source]
        source: FormulaError,
    },
    #[error(transparent)]
    DiceService(#[from] DiceServiceError),
}

/// A single target was skipped; the rest of the attack still resolves
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidTargetError {
    #[error("Target {target} has no {defense_type} value")]
    MissingDefense {
        target: TargetId,
        defense_type: DefenseType,
    },
}

impl InvalidTargetError {
    pub fn target(&self) -> &TargetId {
        match self {
            InvalidTargetError::MissingDefense { target, .. } => target,
        }
    }
}
