//! Save records: the persisted snapshot of a trip.
//!
//! The wire format uses camelCase keys. Every field is optional when
//! reading; missing resources fall back to the configured starting
//! supplies, while a missing or mismatched party is rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TrailConfig;
use crate::party::{Party, default_name};
use crate::person::Person;
use crate::state::TripState;
use crate::wagon::Wagon;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save has no party")]
    MissingParty,
    #[error("save has {found} party members, expected {expected}")]
    PartySize { expected: usize, found: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub health: Option<i64>,
    #[serde(default)]
    pub alive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miles_traveled: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spare_wheels: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spare_axles: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spare_tongues: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<Vec<PartyEntry>>,
}

fn non_negative(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn stored(value: u32) -> Option<i64> {
    Some(i64::from(value))
}

impl SaveRecord {
    /// Snapshot every wagon field and the full roster, dead included.
    #[must_use]
    pub fn capture(state: &TripState) -> Self {
        let wagon = &state.wagon;
        let party = state
            .party
            .members()
            .iter()
            .map(|member| PartyEntry {
                name: Some(member.name().to_string()),
                health: Some(i64::from(member.health())),
                alive: Some(member.is_alive()),
            })
            .collect();
        Self {
            miles_traveled: stored(wagon.miles_traveled),
            days: stored(wagon.days),
            food: stored(wagon.food),
            ammo: stored(wagon.ammo),
            cash: stored(wagon.cash),
            spare_wheels: stored(wagon.spare_wheels),
            spare_axles: stored(wagon.spare_axles),
            spare_tongues: stored(wagon.spare_tongues),
            party: Some(party),
        }
    }

    /// Rebuild a trip. The party must hold exactly `party_size` entries;
    /// health is clamped and dead members are pinned to zero.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::MissingParty`] or [`SaveError::PartySize`] when
    /// the roster cannot be paired with the configured party.
    pub fn restore(self, cfg: &TrailConfig) -> Result<TripState, SaveError> {
        let entries = match self.party {
            Some(entries) if !entries.is_empty() => entries,
            _ => return Err(SaveError::MissingParty),
        };
        if entries.len() != cfg.party_size {
            return Err(SaveError::PartySize {
                expected: cfg.party_size,
                found: entries.len(),
            });
        }

        let members = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let health = entry.health.map_or(cfg.max_health, non_negative);
                Person::restore(
                    entry.name.unwrap_or_else(|| default_name(index + 1)),
                    health,
                    entry.alive.unwrap_or(health > 0),
                    cfg.max_health,
                )
            })
            .collect();

        let start = &cfg.starting;
        let or_start = |value: Option<i64>, fallback: u32| value.map_or(fallback, non_negative);
        let wagon = Wagon {
            miles_traveled: or_start(self.miles_traveled, 0),
            days: or_start(self.days, 0),
            food: or_start(self.food, start.food),
            ammo: or_start(self.ammo, start.ammo),
            cash: or_start(self.cash, start.cash),
            spare_wheels: or_start(self.spare_wheels, start.spare_wheels),
            spare_axles: or_start(self.spare_axles, start.spare_axles),
            spare_tongues: or_start(self.spare_tongues, start.spare_tongues),
        };

        Ok(TripState {
            party: Party::from_members(members),
            wagon,
        })
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// # Errors
    ///
    /// Returns [`SaveError::Json`] for malformed documents.
    pub fn from_json(raw: &str) -> Result<Self, SaveError> {
        Ok(serde_json::from_str(raw)?)
    }
}
