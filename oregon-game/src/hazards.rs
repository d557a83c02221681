//! Per-member hazard passes: every living traveler rolls independently.

use crate::constants::{TRAIL_HAZARD_CHANCE, TRAIL_HAZARD_DAMAGE_MAX, TRAIL_HAZARD_DAMAGE_MIN};
use crate::context::TurnCtx;
use crate::state::TripState;

/// Roll `chance` for each living member in roster order; each hit deals
/// `min..=max` damage. Returns how many members were hit.
pub fn hazard_pass(
    state: &mut TripState,
    ctx: &mut TurnCtx<'_>,
    chance: f64,
    min: u32,
    max: u32,
) -> u32 {
    let mut hits = 0;
    for index in 0..state.party.len() {
        let alive = state.party.member(index).is_some_and(|m| m.is_alive());
        if !alive || !ctx.rng.roll(chance) {
            continue;
        }
        let damage = ctx.rng.range(min, max);
        let _ = state.party.injure_and_report(index, damage, ctx.console);
        hits += 1;
    }
    hits
}

/// The everyday wear of the trail: 12% each, 0-6 damage.
pub fn trail_hazards(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> u32 {
    hazard_pass(
        state,
        ctx,
        TRAIL_HAZARD_CHANCE,
        TRAIL_HAZARD_DAMAGE_MIN,
        TRAIL_HAZARD_DAMAGE_MAX,
    )
}
