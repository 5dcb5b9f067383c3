//! Combat - resolving weapon attacks and applying their results
//!
//! An attack rolls once for the whole attack group: one to-hit roll and one
//! damage roll covering every shot or strike. Each target is then checked
//! against those two rolls independently.

mod apply;
mod error;
mod profile;
mod resolution;
mod result;
mod usage;

pub use apply::{apply_damage, DamageInstance, HealthChange};
pub use error::{AttackError, InvalidTargetError};
pub use profile::{AttackerProfile, Capacity, TargetProfile, WeaponProfile};
pub use resolution::{attack_formula, evaluate_target, resource_usage, AttackResolver};
pub use result::{AttackOutcome, AttackResult, OutcomeFlags, ResourceDeltas};
pub use usage::{reload, use_item, UsageOutcome};
