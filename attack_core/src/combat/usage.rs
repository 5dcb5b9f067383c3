//! Non-attack item use and reloading

use super::profile::Capacity;
use crate::types::Pool;
use serde::{Deserialize, Serialize};

/// Resource changes from using an item outside of an attack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageOutcome {
    /// Capacity after use, if the item tracks capacity
    pub capacity: Option<Capacity>,
    /// Power after use, if any was spent
    pub power: Option<i32>,
    /// The item was used while already empty
    pub no_capacity: bool,
    /// The cost exceeded the power available
    pub power_warning: bool,
}

/// Use an item: spend one charge and its power cost
///
/// Both values are clamped to their pool, so an empty item stays at 0 and
/// power never goes negative.
pub fn use_item(capacity: Capacity, power: &Pool, power_cost: u32) -> UsageOutcome {
    let mut outcome = UsageOutcome::default();

    if let Capacity::Limited { value, max } = capacity {
        outcome.no_capacity = value == 0;
        outcome.capacity = Some(Capacity::Limited {
            value: value.saturating_sub(1).min(max),
            max,
        });
    }

    if power.is_used && power_cost != 0 {
        let cost = i32::try_from(power_cost).unwrap_or(i32::MAX);
        outcome.power_warning = cost > power.value;
        outcome.power = Some(power.value.saturating_sub(cost).clamp(0, power.max.max(0)));
    }

    outcome
}

/// Refill a weapon to its maximum capacity
pub fn reload(capacity: Capacity) -> Capacity {
    match capacity {
        Capacity::Unlimited => Capacity::Unlimited,
        Capacity::Limited { max, .. } => Capacity::Limited { value: max, max },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_use_spends_charge_and_power() {
        let outcome = use_item(Capacity::limited(3, 5), &Pool::new(10, 10), 4);
        assert_eq!(outcome.capacity, Some(Capacity::limited(2, 5)));
        assert_eq!(outcome.power, Some(6));
        assert!(!outcome.no_capacity);
        assert!(!outcome.power_warning);
    }

    #[test]
    fn test_use_when_empty() {
        let outcome = use_item(Capacity::limited(0, 5), &Pool::new(2, 10), 4);
        assert!(outcome.no_capacity);
        assert_eq!(outcome.capacity, Some(Capacity::limited(0, 5)));
        assert!(outcome.power_warning);
        assert_eq!(outcome.power, Some(0));
    }

    #[test]
    fn test_untracked_power_is_ignored() {
        let power = Pool {
            is_used: false,
            ..Pool::new(0, 0)
        };
        let outcome = use_item(Capacity::Unlimited, &power, 4);
        assert_eq!(outcome, UsageOutcome::default());
    }

    #[test]
    fn test_reload() {
        assert_eq!(reload(Capacity::limited(0, 12)), Capacity::limited(12, 12));
        assert_eq!(reload(Capacity::Unlimited), Capacity::Unlimited);
    }
}
