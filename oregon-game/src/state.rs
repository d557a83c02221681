//! Trip state owned by the controller, and the victory/failure predicates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::TrailConfig;
use crate::constants::DESTITUTE_HEALTH_THRESHOLD;
use crate::party::Party;
use crate::wagon::Wagon;

/// Party and wagon for one run. Neither owns the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripState {
    pub party: Party,
    pub wagon: Wagon,
}

impl TripState {
    /// Fresh trip: full-health party and a wagon with starting supplies.
    #[must_use]
    pub fn new<I, S>(names: I, cfg: &TrailConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            party: Party::from_names(names, cfg.max_health),
            wagon: Wagon::new(cfg),
        }
    }

    /// Resource and roster snapshot, the same text the turn loop renders.
    #[must_use]
    pub fn status_report(&self, cfg: &TrailConfig) -> String {
        format!("{}\n\nParty:\n{}", self.wagon.status(cfg), self.party.summary())
    }

    /// Classify the trip. Reaching the destination is checked first.
    #[must_use]
    pub fn evaluate(&self, cfg: &TrailConfig) -> TripStatus {
        if self.wagon.miles_traveled >= cfg.total_miles {
            return TripStatus::Won;
        }
        if self.party.all_dead() {
            return TripStatus::Lost(LossCause::PartyDead);
        }
        if self.is_destitute() {
            return TripStatus::Lost(LossCause::Destitute);
        }
        TripStatus::Playing
    }

    /// No food, ammo or cash, and nobody left with the strength to recover.
    fn is_destitute(&self) -> bool {
        let wagon = &self.wagon;
        wagon.food == 0
            && wagon.ammo == 0
            && wagon.cash == 0
            && self
                .party
                .alive_members()
                .all(|member| member.health() < DESTITUTE_HEALTH_THRESHOLD)
    }

    #[must_use]
    pub fn summary(&self, cfg: &TrailConfig) -> TripSummary {
        TripSummary {
            days: self.wagon.days,
            miles: self.wagon.miles_traveled,
            cash: self.wagon.cash,
            food: self.wagon.food,
            survivors: self.party.alive_count(),
            party_size: cfg.party_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossCause {
    PartyDead,
    Destitute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "cause", rename_all = "snake_case")]
pub enum TripStatus {
    #[default]
    Playing,
    Won,
    Lost(LossCause),
}

impl TripStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Playing => f.write_str("playing"),
            Self::Won => f.write_str("won"),
            Self::Lost(LossCause::PartyDead) => f.write_str("lost (party dead)"),
            Self::Lost(LossCause::Destitute) => f.write_str("lost (out of supplies)"),
        }
    }
}

/// End-of-trip numbers reported on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripSummary {
    pub days: u32,
    pub miles: u32,
    pub cash: u32,
    pub food: u32,
    pub survivors: u32,
    pub party_size: usize,
}
