//! Trading posts: session prices, the shopping menu, and purchases.

use serde::{Deserialize, Serialize};

use crate::console::ask_choice;
use crate::constants::{
    TRADE_AMMO_PRICE_MAX, TRADE_AMMO_PRICE_MIN, TRADE_FOOD_PRICE_MAX, TRADE_FOOD_PRICE_MIN,
    TRADE_WHEEL_PRICE_MAX, TRADE_WHEEL_PRICE_MIN,
};
use crate::context::TurnCtx;
use crate::rng::RandomSource;
use crate::state::TripState;
use crate::wagon::Wagon;

const MENU_PROMPT: &str = "(buy_food/buy_ammo/buy_wheel/leave) ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeGood {
    Food,
    Ammo,
    Wheel,
}

impl TradeGood {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Ammo => "ammo",
            Self::Wheel => "wheel",
        }
    }
}

/// Prices fixed for the length of one visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prices {
    pub food_per_unit: u32,
    pub ammo_per_round: u32,
    pub wheel: u32,
}

impl Prices {
    /// Draw food, ammo and wheel prices, in that order.
    pub fn roll(rng: &mut dyn RandomSource) -> Self {
        Self {
            food_per_unit: rng.range(TRADE_FOOD_PRICE_MIN, TRADE_FOOD_PRICE_MAX),
            ammo_per_round: rng.range(TRADE_AMMO_PRICE_MIN, TRADE_AMMO_PRICE_MAX),
            wheel: rng.range(TRADE_WHEEL_PRICE_MIN, TRADE_WHEEL_PRICE_MAX),
        }
    }

    /// Total cost of `quantity` units of `good`; wheels are sold singly.
    #[must_use]
    pub const fn cost(&self, good: TradeGood, quantity: u32) -> Option<u32> {
        match good {
            TradeGood::Food => self.food_per_unit.checked_mul(quantity),
            TradeGood::Ammo => self.ammo_per_round.checked_mul(quantity),
            TradeGood::Wheel => self.wheel.checked_mul(quantity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "purchase", rename_all = "snake_case")]
pub enum Purchase {
    Bought {
        good: TradeGood,
        quantity: u32,
        cost: u32,
    },
    /// Reported to the player; the wagon is left untouched.
    InsufficientFunds { good: TradeGood, cost: u32 },
}

/// Buy `quantity` of `good` at `prices` if the wagon can pay for it.
pub fn buy(wagon: &mut Wagon, prices: &Prices, good: TradeGood, quantity: u32) -> Purchase {
    let Some(cost) = prices.cost(good, quantity) else {
        return Purchase::InsufficientFunds {
            good,
            cost: u32::MAX,
        };
    };
    if !wagon.try_spend(cost) {
        return Purchase::InsufficientFunds { good, cost };
    }
    match good {
        TradeGood::Food => wagon.food = wagon.food.saturating_add(quantity),
        TradeGood::Ammo => wagon.ammo = wagon.ammo.saturating_add(quantity),
        TradeGood::Wheel => wagon.spare_wheels = wagon.spare_wheels.saturating_add(quantity),
    }
    Purchase::Bought {
        good,
        quantity,
        cost,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Buy(TradeGood),
    Leave,
    Unknown,
}

fn parse_menu(reply: &str) -> MenuChoice {
    if reply.starts_with("buy_food") {
        MenuChoice::Buy(TradeGood::Food)
    } else if reply.starts_with("buy_ammo") {
        MenuChoice::Buy(TradeGood::Ammo)
    } else if reply.starts_with("buy_wheel") {
        MenuChoice::Buy(TradeGood::Wheel)
    } else if reply.is_empty() || reply == "leave" {
        MenuChoice::Leave
    } else {
        MenuChoice::Unknown
    }
}

/// Everything that happened during one visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSession {
    pub prices: Prices,
    pub purchases: Vec<Purchase>,
}

/// Spend a day at a trading post, shopping until the player leaves.
pub fn visit_trading_post(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> TradeSession {
    ctx.say("You find a trading post / fort.");
    state.wagon.advance_days(1);
    let prices = Prices::roll(ctx.rng);
    ctx.say(&format!(
        "Prices: food {}/unit, ammo {}/round, wheel ${}.",
        prices.food_per_unit, prices.ammo_per_round, prices.wheel
    ));

    let mut purchases = Vec::new();
    loop {
        ctx.say("Options: buy_food, buy_ammo, buy_wheel, leave");
        let good = match parse_menu(&ask_choice(ctx.console, MENU_PROMPT)) {
            MenuChoice::Buy(good) => good,
            MenuChoice::Leave => break,
            MenuChoice::Unknown => {
                ctx.say("Unknown option.");
                continue;
            }
        };

        let quantity = match good {
            TradeGood::Wheel => 1,
            TradeGood::Food | TradeGood::Ammo => {
                let prompt = if good == TradeGood::Food {
                    "How many food units? "
                } else {
                    "How many ammo rounds? "
                };
                match ctx.console.ask(prompt).parse::<u32>() {
                    Ok(quantity) => quantity,
                    Err(_) => {
                        ctx.say("Please enter a whole number.");
                        continue;
                    }
                }
            }
        };

        let purchase = buy(&mut state.wagon, &prices, good, quantity);
        match purchase {
            Purchase::Bought { good, quantity, cost } => {
                let line = match good {
                    TradeGood::Wheel => format!("Bought a spare wheel for ${cost}."),
                    TradeGood::Food | TradeGood::Ammo => {
                        format!("Bought {quantity} {} for ${cost}.", good.key())
                    }
                };
                ctx.say(&line);
            }
            Purchase::InsufficientFunds { .. } => ctx.say("Not enough money."),
        }
        log::debug!("trade: {purchase:?}");
        purchases.push(purchase);
    }

    TradeSession { prices, purchases }
}
