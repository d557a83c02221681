//! River crossings: the ford / float / ferry decision and its consequences.
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{
    FERRY_COST_MAX, FERRY_COST_MIN, FERRY_MAX_RETRIES, FLOAT_COST_MAX, FLOAT_COST_MIN,
    FLOAT_STRUGGLE_CHANCE, FLOAT_STRUGGLE_DAMAGE_MAX, FLOAT_STRUGGLE_DAMAGE_MIN,
    FORD_DROWNING_CHANCE, FORD_FOOD_LOSS_MAX, FORD_FOOD_LOSS_MIN, FORD_FOOD_RISK_SCALE,
    FORD_MAX_RISK, RIVER_WIDTH_MAX_FT, RIVER_WIDTH_MIN_FT,
};
use crate::console::ask_choice;
use crate::context::TurnCtx;
use crate::hazards::trail_hazards;
use crate::numbers::u32_to_f64;
use crate::state::TripState;

const CROSSING_PROMPT: &str = "(ford/float/ferry) ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingChoice {
    Ford,
    Float,
    Ferry,
}

impl FromStr for CrossingChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "ford" => Ok(Self::Ford),
            "float" => Ok(Self::Float),
            "ferry" => Ok(Self::Ferry),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CrossingResult {
    /// Forded without losing the current.
    Forded { injured: u32 },
    /// The wagon flooded mid-ford.
    Flooded { food_lost: u32, drowned: Option<String> },
    Paid { choice: CrossingChoice, cost: u32 },
    /// Could not afford the raft and floated the wagon anyway.
    Struggled { injured: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingOutcome {
    pub width_ft: u32,
    /// Ferry quotes that could not be paid before the final attempt.
    pub ferry_refusals: u32,
    pub result: CrossingResult,
}

/// Probability that fording floods the wagon; a heavier larder rides lower
/// in the water and is safer.
#[must_use]
pub fn ford_risk(food: u32) -> f64 {
    FORD_MAX_RISK.min(1.0 - u32_to_f64(food) / FORD_FOOD_RISK_SCALE)
}

/// Present the river, ask how to cross and resolve the choice.
///
/// An unaffordable ferry presents the river again from the start; after
/// `FERRY_MAX_RETRIES` refusals the wagon fords.
pub fn resolve_river(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> CrossingOutcome {
    let mut ferry_refusals = 0;
    loop {
        let width_ft = ctx.rng.range(RIVER_WIDTH_MIN_FT, RIVER_WIDTH_MAX_FT);
        ctx.say(&format!(
            "You reach a river {width_ft}ft wide. Options: ford, float, ferry."
        ));
        let choice = if ferry_refusals >= FERRY_MAX_RETRIES {
            ctx.say("Out of options, you drive the wagon into the ford.");
            CrossingChoice::Ford
        } else {
            ask_crossing(ctx)
        };
        log::debug!("river crossing: {choice:?} (ferry refusals {ferry_refusals})");

        let result = match choice {
            CrossingChoice::Ford => ford(state, ctx),
            CrossingChoice::Float => float(state, ctx),
            CrossingChoice::Ferry => {
                let cost = ctx.rng.range(FERRY_COST_MIN, FERRY_COST_MAX);
                if state.wagon.try_spend(cost) {
                    ctx.say(&format!("You pay ${cost} for the ferry; safe and quick."));
                    CrossingResult::Paid { choice, cost }
                } else {
                    ctx.say("No ferry you can afford. Choose another way across.");
                    ferry_refusals += 1;
                    continue;
                }
            }
        };
        return CrossingOutcome {
            width_ft,
            ferry_refusals,
            result,
        };
    }
}

fn ask_crossing(ctx: &mut TurnCtx<'_>) -> CrossingChoice {
    loop {
        let reply = ask_choice(ctx.console, CROSSING_PROMPT);
        if let Ok(choice) = reply.parse() {
            return choice;
        }
        ctx.say("Please choose ford, float or ferry.");
    }
}

fn ford(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> CrossingResult {
    let risk = ford_risk(state.wagon.food);
    if ctx.rng.roll(risk) {
        ctx.say("The wagon hits a hidden current. Water floods the wagon!");
        let wanted = ctx.rng.range(FORD_FOOD_LOSS_MIN, FORD_FOOD_LOSS_MAX);
        let food_lost = state.wagon.lose_food(wanted);
        ctx.say(&format!("You lost {food_lost} food to the river."));
        let mut drowned = None;
        if ctx.rng.roll(FORD_DROWNING_CHANCE)
            && let Some(victim) = state.party.pick_alive(ctx.rng)
            && state.party.kill(victim, ctx.console)
        {
            drowned = state.party.member(victim).map(|m| m.name().to_string());
        }
        CrossingResult::Flooded { food_lost, drowned }
    } else {
        ctx.say("You cross safely but it's tiring.");
        let injured = trail_hazards(state, ctx);
        CrossingResult::Forded { injured }
    }
}

fn float(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> CrossingResult {
    let cost = ctx.rng.range(FLOAT_COST_MIN, FLOAT_COST_MAX);
    if state.wagon.try_spend(cost) {
        ctx.say(&format!(
            "You hire a raft and pay ${cost}. Crossed safely."
        ));
        return CrossingResult::Paid {
            choice: CrossingChoice::Float,
            cost,
        };
    }

    ctx.say("Can't afford a raft. You try to float and struggle.");
    let mut injured = None;
    if ctx.rng.roll(FLOAT_STRUGGLE_CHANCE)
        && let Some(victim) = state.party.pick_alive(ctx.rng)
    {
        let damage = ctx
            .rng
            .range(FLOAT_STRUGGLE_DAMAGE_MIN, FLOAT_STRUGGLE_DAMAGE_MAX);
        let _ = state.party.injure_and_report(victim, damage, ctx.console);
        injured = state.party.member(victim).map(|m| m.name().to_string());
    }
    CrossingResult::Struggled { injured }
}
