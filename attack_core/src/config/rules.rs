//! Table rules that apply to every attack

use super::ConfigError;
use crate::defense::RANGE_PENALTY_PER_INCREMENT;
use crate::grid::SquareGrid;
use crate::types::CriticalRule;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable attack rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConstants {
    /// How damage dice explode
    #[serde(default)]
    pub critical_rule: CriticalRule,
    /// Defense added per range increment beyond the first
    #[serde(default = "default_range_penalty")]
    pub range_penalty: u32,
    /// Grid used to measure distances
    #[serde(default)]
    pub grid: SquareGrid,
}

fn default_range_penalty() -> u32 {
    RANGE_PENALTY_PER_INCREMENT
}

impl Default for RulesConstants {
    fn default() -> Self {
        RulesConstants {
            critical_rule: CriticalRule::default(),
            range_penalty: default_range_penalty(),
            grid: SquareGrid::default(),
        }
    }
}

impl RulesConstants {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        super::load_toml::<Self>(path)?.validated()
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        super::parse_toml::<Self>(content)?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.grid.unit == 0 {
            return Err(ConfigError::ValidationError(
                "grid.unit must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Rules from the bundled `rules.toml`
pub fn default_rules() -> RulesConstants {
    let toml = include_str!("../../config/rules.toml");
    RulesConstants::parse(toml).unwrap_or_default()
}
