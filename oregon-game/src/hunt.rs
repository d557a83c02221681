//! Hunting: spend ammunition for a chance at fresh food.

use serde::{Deserialize, Serialize};

use crate::constants::{
    HUNT_ACCIDENT_CHANCE, HUNT_ACCIDENT_DAMAGE_MAX, HUNT_ACCIDENT_DAMAGE_MIN, HUNT_BASE_SUCCESS,
    HUNT_SHOTS_MAX, HUNT_SHOTS_MIN, HUNT_SUCCESS_PER_ROUND,
};
use crate::context::TurnCtx;
use crate::numbers::u32_to_f64;
use crate::state::TripState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HuntOutcome {
    NoAmmo,
    Hunted {
        rounds_used: u32,
        /// Zero when the party came back empty-handed.
        food_gained: u32,
        /// Member hurt in a hunting accident, if any.
        accident: Option<String>,
    },
}

/// Odds of bringing back game after firing `rounds` shots.
#[must_use]
pub fn success_chance(rounds: u32) -> f64 {
    HUNT_BASE_SUCCESS + u32_to_f64(rounds) * HUNT_SUCCESS_PER_ROUND
}

/// Spend a day hunting. Without ammunition the day is simply lost.
pub fn resolve_hunt(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> HuntOutcome {
    ctx.say("You go hunting.");
    state.wagon.advance_days(1);
    if state.wagon.ammo == 0 {
        ctx.say("No ammo to hunt with.");
        return HuntOutcome::NoAmmo;
    }

    let shots = ctx.rng.range(HUNT_SHOTS_MIN, HUNT_SHOTS_MAX);
    let rounds_used = state.wagon.ammo.min(shots);
    state.wagon.ammo -= rounds_used;

    let mut food_gained = 0;
    if ctx.rng.roll(success_chance(rounds_used)) {
        food_gained = ctx.rng.range(ctx.cfg.hunt_food_min, ctx.cfg.hunt_food_max);
        state.wagon.food = state.wagon.food.saturating_add(food_gained);
        ctx.say(&format!(
            "Success! You brought back {food_gained} food (used {rounds_used} ammo)."
        ));
    } else {
        ctx.say(&format!("You returned with little. (used {rounds_used} ammo)"));
    }

    let mut accident = None;
    if ctx.rng.roll(HUNT_ACCIDENT_CHANCE)
        && let Some(victim) = state.party.pick_alive(ctx.rng)
    {
        let damage = ctx
            .rng
            .range(HUNT_ACCIDENT_DAMAGE_MIN, HUNT_ACCIDENT_DAMAGE_MAX);
        let name = state
            .party
            .member(victim)
            .map(|m| m.name().to_string())
            .unwrap_or_default();
        ctx.say(&format!("{name} was hurt in a hunting accident."));
        let _ = state.party.injure_and_report(victim, damage, ctx.console);
        accident = Some(name);
    }
    log::debug!("hunt: used {rounds_used} rounds, gained {food_gained} food");

    HuntOutcome::Hunted {
        rounds_used,
        food_gained,
        accident,
    }
}
