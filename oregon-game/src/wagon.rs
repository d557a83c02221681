//! Wagon resources: distance, elapsed days, supplies and spare parts.
use serde::{Deserialize, Serialize};

use crate::config::TrailConfig;
use crate::console::Console;
use crate::party::Party;
use crate::rng::RandomSource;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Wheel,
    Axle,
    Tongue,
}

impl Part {
    pub const ALL: [Self; 3] = [Self::Wheel, Self::Axle, Self::Tongue];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wheel => "wheel",
            Self::Axle => "axle",
            Self::Tongue => "tongue",
        }
    }
}

/// Outcome of the daily ration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ration {
    Satisfied,
    /// Food ran out; `deficit` penalty blows were dealt to the living.
    Starved { deficit: u32, deaths: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wagon {
    pub miles_traveled: u32,
    pub days: u32,
    pub food: u32,
    pub ammo: u32,
    pub cash: u32,
    pub spare_wheels: u32,
    pub spare_axles: u32,
    pub spare_tongues: u32,
}

impl Wagon {
    /// Wagon loaded with the configured starting supplies.
    #[must_use]
    pub const fn new(cfg: &TrailConfig) -> Self {
        Self {
            miles_traveled: 0,
            days: 0,
            food: cfg.starting.food,
            ammo: cfg.starting.ammo,
            cash: cfg.starting.cash,
            spare_wheels: cfg.starting.spare_wheels,
            spare_axles: cfg.starting.spare_axles,
            spare_tongues: cfg.starting.spare_tongues,
        }
    }

    #[must_use]
    pub const fn spares(&self, part: Part) -> u32 {
        match part {
            Part::Wheel => self.spare_wheels,
            Part::Axle => self.spare_axles,
            Part::Tongue => self.spare_tongues,
        }
    }

    /// Consume one spare of `part` if any remain.
    pub const fn use_spare(&mut self, part: Part) -> bool {
        let slot = match part {
            Part::Wheel => &mut self.spare_wheels,
            Part::Axle => &mut self.spare_axles,
            Part::Tongue => &mut self.spare_tongues,
        };
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    pub const fn advance_days(&mut self, days: u32) {
        self.days = self.days.saturating_add(days);
    }

    pub const fn advance_miles(&mut self, miles: u32) {
        self.miles_traveled = self.miles_traveled.saturating_add(miles);
    }

    /// Remove up to `amount` food, returning what was actually lost.
    pub fn lose_food(&mut self, amount: u32) -> u32 {
        let lost = self.food.min(amount);
        self.food -= lost;
        lost
    }

    /// Remove up to `amount` cash, returning what was actually lost.
    pub fn lose_cash(&mut self, amount: u32) -> u32 {
        let lost = self.cash.min(amount);
        self.cash -= lost;
        lost
    }

    /// Spend `cost` if affordable; leaves cash untouched otherwise.
    pub const fn try_spend(&mut self, cost: u32) -> bool {
        if cost > self.cash {
            return false;
        }
        self.cash -= cost;
        true
    }

    /// Feed the living party. A shortfall empties the larder and deals one
    /// starvation blow per missing unit, each to a living member chosen at
    /// random from the roster as it stands at that moment.
    pub fn consume_food(
        &mut self,
        party: &mut Party,
        cfg: &TrailConfig,
        rng: &mut dyn RandomSource,
        console: &mut dyn Console,
    ) -> Ration {
        let required = party.alive_count().saturating_mul(cfg.food_per_person);
        if self.food >= required {
            self.food -= required;
            return Ration::Satisfied;
        }

        let deficit = required - self.food;
        self.food = 0;
        log::debug!("starvation: required {required}, deficit {deficit}");
        // Victims come from the members alive at the start of the meal; a
        // member who dies partway may be picked again to no effect.
        let alive = party.alive_indices();
        let mut deaths = Vec::new();
        for _ in 0..deficit {
            let Some(victim) = rng.pick(alive.len()).and_then(|slot| alive.get(slot).copied())
            else {
                break;
            };
            let injury = party.injure_and_report(victim, cfg.starvation_damage, console);
            if injury.is_fatal()
                && let Some(member) = party.member(victim)
            {
                deaths.push(member.name().to_string());
            }
        }
        Ration::Starved { deficit, deaths }
    }

    /// Multi-line snapshot of every resource.
    #[must_use]
    pub fn status(&self, cfg: &TrailConfig) -> String {
        format!(
            "Miles: {}/{}  Days: {}\nFood: {}  Ammo: {}  Cash: ${}\nSpare wheels: {}  spare axles: {}  spare tongues: {}",
            self.miles_traveled,
            cfg.total_miles,
            self.days,
            self.food,
            self.ammo,
            self.cash,
            self.spare_wheels,
            self.spare_axles,
            self.spare_tongues,
        )
    }
}
