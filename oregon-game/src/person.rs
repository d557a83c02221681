//! A single traveler: name, health and the one-way alive/dead transition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of applying damage to a traveler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Injury {
    /// Already dead; nothing changed.
    Unaffected,
    Wounded { remaining: u32 },
    /// Health crossed to zero on this call.
    Died,
}

impl Injury {
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Died)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: String,
    health: u32,
    alive: bool,
    max_health: u32,
}

impl Person {
    /// Fresh traveler at full health.
    #[must_use]
    pub fn new(name: impl Into<String>, max_health: u32) -> Self {
        Self {
            name: name.into(),
            health: max_health,
            alive: max_health > 0,
            max_health,
        }
    }

    /// Rebuild a traveler from saved values, normalizing the alive invariant:
    /// health is clamped to `max_health`, and a zero-health or dead record is
    /// restored dead with health pinned to 0.
    #[must_use]
    pub fn restore(name: impl Into<String>, health: u32, alive: bool, max_health: u32) -> Self {
        let health = health.min(max_health);
        let alive = alive && health > 0;
        Self {
            name: name.into(),
            health: if alive { health } else { 0 },
            alive,
            max_health,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Subtract `amount` from health. Dropping to zero or below kills the
    /// traveler; the dead stay dead.
    pub fn injure(&mut self, amount: u32) -> Injury {
        if !self.alive {
            return Injury::Unaffected;
        }
        if amount >= self.health {
            self.die();
            return Injury::Died;
        }
        self.health -= amount;
        Injury::Wounded {
            remaining: self.health,
        }
    }

    /// Restore up to `amount` health, capped at the maximum. No effect on the dead.
    pub fn heal(&mut self, amount: u32) {
        if !self.alive {
            return;
        }
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Kill outright. Returns false if the traveler was already dead.
    pub fn die(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.health = 0;
        true
    }

    /// `"dead"` or `"<health>/<max> hp"`.
    #[must_use]
    pub fn status(&self) -> String {
        if self.alive {
            format!("{}/{} hp", self.health, self.max_health)
        } else {
            String::from("dead")
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.status())
    }
}
