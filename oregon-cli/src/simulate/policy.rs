use std::fmt;

use clap::ValueEnum;
use oregon_game::{Action, TrailConfig, TripState};
use serde::Serialize;

/// Days of rations a shopping trip aims to buy.
const SHOPPING_DAYS: u32 = 10;
/// Highest per-unit food price a trading post asks.
const WORST_FOOD_PRICE: u32 = 15;

/// One turn's choice, plus the answers to any prompts the action raises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub replies: Vec<String>,
}

impl Decision {
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self {
            action,
            replies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_replies<I, S>(mut self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replies.extend(replies.into_iter().map(Into::into));
        self
    }
}

/// Policy interface for automated play.
pub trait TrailPolicy {
    fn name(&self) -> &'static str;

    fn decide(&mut self, state: &TripState, cfg: &TrailConfig) -> Decision;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Rest early, keep a deep larder, pay for ferries
    Cautious,
    /// Balanced pace; floats across rivers
    Steady,
    /// Push miles, ford everything, stop only when desperate
    Reckless,
}

impl Strategy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cautious => "cautious",
            Self::Steady => "steady",
            Self::Reckless => "reckless",
        }
    }

    #[must_use]
    pub fn create_policy(self) -> Box<dyn TrailPolicy> {
        let thresholds = match self {
            Self::Cautious => Thresholds {
                rest_below: 60,
                hunt_below_food: 150,
                shop_below_food: 250,
                shop_min_cash: 100,
                crossing: "ferry",
            },
            Self::Steady => Thresholds {
                rest_below: 40,
                hunt_below_food: 80,
                shop_below_food: 120,
                shop_min_cash: 150,
                crossing: "float",
            },
            Self::Reckless => Thresholds {
                rest_below: 20,
                hunt_below_food: 20,
                shop_below_food: 0,
                shop_min_cash: u32::MAX,
                crossing: "ford",
            },
        };
        Box::new(ThresholdPolicy {
            name: self.label(),
            thresholds,
        })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy)]
struct Thresholds {
    rest_below: u32,
    hunt_below_food: u32,
    shop_below_food: u32,
    shop_min_cash: u32,
    crossing: &'static str,
}

struct ThresholdPolicy {
    name: &'static str,
    thresholds: Thresholds,
}

impl TrailPolicy for ThresholdPolicy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn decide(&mut self, state: &TripState, cfg: &TrailConfig) -> Decision {
        let t = self.thresholds;
        let wagon = &state.wagon;
        let weakest = state
            .party
            .alive_members()
            .map(|m| m.health())
            .min()
            .unwrap_or(0);

        if weakest < t.rest_below && wagon.food > 0 {
            return Decision::new(Action::Rest);
        }
        if wagon.food < t.hunt_below_food && wagon.ammo > 0 {
            return Decision::new(Action::Hunt);
        }
        if wagon.food < t.shop_below_food && wagon.cash >= t.shop_min_cash {
            let mouths = state.party.alive_count().max(1);
            let wanted = mouths
                .saturating_mul(cfg.food_per_person)
                .saturating_mul(SHOPPING_DAYS);
            let affordable = wagon.cash / WORST_FOOD_PRICE;
            let units = wanted.min(affordable).to_string();
            let mut replies = vec!["buy_food".to_string(), units];
            if wagon.spare_wheels == 0 {
                replies.push("buy_wheel".to_string());
            }
            replies.push("leave".to_string());
            return Decision::new(Action::Trade).with_replies(replies);
        }
        Decision::new(Action::Travel).with_replies([t.crossing])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> (TripState, TrailConfig) {
        let cfg = TrailConfig::default();
        (TripState::new(["A", "B", "C", "D"], &cfg), cfg)
    }

    #[test]
    fn healthy_full_wagon_travels() {
        let (state, cfg) = fresh();
        for strategy in [Strategy::Cautious, Strategy::Steady, Strategy::Reckless] {
            let decision = strategy.create_policy().decide(&state, &cfg);
            assert_eq!(decision.action, Action::Travel, "{strategy}");
        }
    }

    #[test]
    fn crossing_reply_follows_the_strategy() {
        let (state, cfg) = fresh();
        let reply = |s: Strategy| s.create_policy().decide(&state, &cfg).replies;
        assert_eq!(reply(Strategy::Cautious), vec!["ferry"]);
        assert_eq!(reply(Strategy::Steady), vec!["float"]);
        assert_eq!(reply(Strategy::Reckless), vec!["ford"]);
    }

    #[test]
    fn cautious_rests_before_the_reckless_would() {
        let (mut state, cfg) = fresh();
        let _ = state.party.injure(0, 50);
        assert_eq!(
            Strategy::Cautious.create_policy().decide(&state, &cfg).action,
            Action::Rest
        );
        assert_eq!(
            Strategy::Reckless.create_policy().decide(&state, &cfg).action,
            Action::Travel
        );
    }

    #[test]
    fn low_food_means_hunting_then_shopping() {
        let (mut state, cfg) = fresh();
        state.wagon.food = 100;
        let mut cautious = Strategy::Cautious.create_policy();
        assert_eq!(cautious.decide(&state, &cfg).action, Action::Hunt);

        state.wagon.ammo = 0;
        let decision = cautious.decide(&state, &cfg);
        assert_eq!(decision.action, Action::Trade);
        assert_eq!(decision.replies, vec!["buy_food", "13", "leave"]);
    }
}
