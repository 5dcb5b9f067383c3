//! Weapon preset loading

use super::ConfigError;
use crate::combat::WeaponProfile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for weapon presets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponsConfig {
    #[serde(rename = "weapons")]
    pub weapons: Vec<WeaponProfile>,
}

/// Load weapon presets from a TOML file, keyed by id
pub fn load_weapon_profiles(path: &Path) -> Result<HashMap<String, WeaponProfile>, ConfigError> {
    let config: WeaponsConfig = super::load_toml(path)?;
    index_weapons(config)
}

/// Load weapon presets from a TOML string, keyed by id
pub fn parse_weapon_profiles(content: &str) -> Result<HashMap<String, WeaponProfile>, ConfigError> {
    let config: WeaponsConfig = super::parse_toml(content)?;
    index_weapons(config)
}

fn index_weapons(config: WeaponsConfig) -> Result<HashMap<String, WeaponProfile>, ConfigError> {
    let mut map = HashMap::new();
    for weapon in config.weapons {
        validate_weapon(&weapon)?;
        if map.contains_key(&weapon.id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate weapon id \"{}\"",
                weapon.id
            )));
        }
        map.insert(weapon.id.clone(), weapon);
    }
    Ok(map)
}

fn validate_weapon(weapon: &WeaponProfile) -> Result<(), ConfigError> {
    if weapon.id.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "weapon \"{}\" has no id",
            weapon.name
        )));
    }
    if weapon.number_of_attacks == 0 {
        return Err(ConfigError::ValidationError(format!(
            "weapon \"{}\" must make at least one attack",
            weapon.id
        )));
    }
    weapon
        .damage_dice()
        .and_then(|dice| dice.scaled(weapon.number_of_attacks))
        .map_err(|e| ConfigError::ValidationError(format!("weapon \"{}\": {}", weapon.id, e)))?;
    Ok(())
}

/// Weapon presets from the bundled `weapons.toml`
pub fn default_weapons() -> HashMap<String, WeaponProfile> {
    let toml = include_str!("../../config/weapons.toml");
    parse_weapon_profiles(toml).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Capacity;
    use crate::types::{DamageType, WeaponType};

    #[test]
    fn test_parse_weapons() {
        let toml = r#"
[[weapons]]
id = "burst_rifle"
name = "Burst Rifle"
weapon_type = "ranged"
damage_type = "ballistic"
damage_formula = "1d8 + 1"
number_of_attacks = 3
armor_penetration = 1
range = 30
capacity = { value = 30, max = 30 }
"#;

        let weapons = parse_weapon_profiles(toml).unwrap();
        let rifle = &weapons["burst_rifle"];
        assert_eq!(rifle.name, "Burst Rifle");
        assert_eq!(rifle.weapon_type, WeaponType::Ranged);
        assert_eq!(rifle.damage_type, DamageType::Ballistic);
        assert_eq!(rifle.number_of_attacks, 3);
        assert_eq!(rifle.capacity, Capacity::limited(30, 30));
    }

    #[test]
    fn test_bad_formula_is_rejected() {
        let toml = r#"
[[weapons]]
id = "broken"
damage_formula = "2d"
"#;
        let err = parse_weapon_profiles(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_zero_attacks_is_rejected() {
        let toml = r#"
[[weapons]]
id = "dud"
damage_formula = "1d6"
number_of_attacks = 0
"#;
        assert!(parse_weapon_profiles(toml).is_err());
    }

    #[test]
    fn test_oversized_attack_group_is_rejected() {
        let toml = r#"
[[weapons]]
id = "minigun"
damage_formula = "1000d6"
number_of_attacks = 1000
"#;
        let err = parse_weapon_profiles(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let toml = r#"
[[weapons]]
id = "knife"
damage_formula = "1d4"

[[weapons]]
id = "knife"
damage_formula = "1d6"
"#;
        assert!(parse_weapon_profiles(toml).is_err());
    }

    #[test]
    fn test_default_weapons_loads_all() {
        let weapons = default_weapons();
        assert_eq!(weapons.len(), 6, "Expected 6 weapons from config");
        for weapon in weapons.values() {
            assert!(weapon.damage_dice().is_ok(), "{} should parse", weapon.id);
        }
    }
}
