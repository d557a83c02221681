//! Trip configuration: trail length, party size and starting supplies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when trip configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} minimum {min} exceeds maximum {max}")]
    RangeInverted {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supplies loaded into the wagon at the start of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartingSupplies {
    #[serde(default = "StartingSupplies::default_food")]
    pub food: u32,
    #[serde(default = "StartingSupplies::default_ammo")]
    pub ammo: u32,
    #[serde(default = "StartingSupplies::default_cash")]
    pub cash: u32,
    #[serde(default = "StartingSupplies::default_spare_wheels")]
    pub spare_wheels: u32,
    #[serde(default = "StartingSupplies::default_spare_axles")]
    pub spare_axles: u32,
    #[serde(default = "StartingSupplies::default_spare_tongues")]
    pub spare_tongues: u32,
}

impl StartingSupplies {
    const fn default_food() -> u32 {
        600
    }

    const fn default_ammo() -> u32 {
        100
    }

    const fn default_cash() -> u32 {
        200
    }

    const fn default_spare_wheels() -> u32 {
        2
    }

    const fn default_spare_axles() -> u32 {
        1
    }

    const fn default_spare_tongues() -> u32 {
        1
    }
}

impl Default for StartingSupplies {
    fn default() -> Self {
        Self {
            food: Self::default_food(),
            ammo: Self::default_ammo(),
            cash: Self::default_cash(),
            spare_wheels: Self::default_spare_wheels(),
            spare_axles: Self::default_spare_axles(),
            spare_tongues: Self::default_spare_tongues(),
        }
    }
}

/// Immutable rules for one trip, passed into party and wagon construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailConfig {
    #[serde(default = "TrailConfig::default_total_miles")]
    pub total_miles: u32,
    #[serde(default = "TrailConfig::default_daily_travel_min")]
    pub daily_travel_min: u32,
    #[serde(default = "TrailConfig::default_daily_travel_max")]
    pub daily_travel_max: u32,
    /// Player plus companions.
    #[serde(default = "TrailConfig::default_party_size")]
    pub party_size: usize,
    #[serde(default = "TrailConfig::default_max_health")]
    pub max_health: u32,
    #[serde(default = "TrailConfig::default_food_per_person")]
    pub food_per_person: u32,
    /// Damage dealt per unit of food shortfall.
    #[serde(default = "TrailConfig::default_starvation_damage")]
    pub starvation_damage: u32,
    #[serde(default = "TrailConfig::default_hunt_food_min")]
    pub hunt_food_min: u32,
    #[serde(default = "TrailConfig::default_hunt_food_max")]
    pub hunt_food_max: u32,
    #[serde(default)]
    pub starting: StartingSupplies,
}

impl TrailConfig {
    const fn default_total_miles() -> u32 {
        2000
    }

    const fn default_daily_travel_min() -> u32 {
        10
    }

    const fn default_daily_travel_max() -> u32 {
        25
    }

    const fn default_party_size() -> usize {
        4
    }

    const fn default_max_health() -> u32 {
        100
    }

    const fn default_food_per_person() -> u32 {
        2
    }

    const fn default_starvation_damage() -> u32 {
        3
    }

    const fn default_hunt_food_min() -> u32 {
        20
    }

    const fn default_hunt_food_max() -> u32 {
        80
    }

    /// Parse a (possibly partial) JSON document; missing fields keep defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or the resulting
    /// configuration fails [`TrailConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the invariants the simulation relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_miles == 0 {
            return Err(ConfigError::Zero {
                field: "total_miles",
            });
        }
        if self.party_size == 0 {
            return Err(ConfigError::Zero {
                field: "party_size",
            });
        }
        if self.max_health == 0 {
            return Err(ConfigError::Zero {
                field: "max_health",
            });
        }
        if self.daily_travel_min > self.daily_travel_max {
            return Err(ConfigError::RangeInverted {
                field: "daily_travel",
                min: self.daily_travel_min,
                max: self.daily_travel_max,
            });
        }
        if self.hunt_food_min > self.hunt_food_max {
            return Err(ConfigError::RangeInverted {
                field: "hunt_food",
                min: self.hunt_food_min,
                max: self.hunt_food_max,
            });
        }
        Ok(())
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            total_miles: Self::default_total_miles(),
            daily_travel_min: Self::default_daily_travel_min(),
            daily_travel_max: Self::default_daily_travel_max(),
            party_size: Self::default_party_size(),
            max_health: Self::default_max_health(),
            food_per_person: Self::default_food_per_person(),
            starvation_damage: Self::default_starvation_damage(),
            hunt_food_min: Self::default_hunt_food_min(),
            hunt_food_max: Self::default_hunt_food_max(),
            starting: StartingSupplies::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_trail() {
        let cfg = TrailConfig::default();
        assert_eq!(cfg.total_miles, 2000);
        assert_eq!(cfg.party_size, 4);
        assert_eq!(cfg.starting.food, 600);
        assert_eq!(cfg.starting.spare_wheels, 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = TrailConfig::from_json(r#"{"total_miles": 500, "starting": {"cash": 50}}"#)
            .expect("valid config");
        assert_eq!(cfg.total_miles, 500);
        assert_eq!(cfg.starting.cash, 50);
        assert_eq!(cfg.starting.food, 600);
        assert_eq!(cfg.max_health, 100);
    }

    #[test]
    fn inverted_travel_range_is_rejected() {
        let err = TrailConfig::from_json(r#"{"daily_travel_min": 30, "daily_travel_max": 5}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::RangeInverted {
                field: "daily_travel",
                ..
            }
        ));
    }

    #[test]
    fn zero_party_is_rejected() {
        let err = TrailConfig::from_json(r#"{"party_size": 0}"#).unwrap_err();
        assert_eq!(err.to_string(), "party_size must be at least 1");
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            TrailConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
