//! Player-invoked actions and the day-advancing ones' effects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{REST_FLAVOR_CHANCE, REST_HEAL_MAX, REST_HEAL_MIN};
use crate::context::TurnCtx;
use crate::events::{EventOutcome, random_event};
use crate::hazards::trail_hazards;
use crate::hunt::{HuntOutcome, resolve_hunt};
use crate::state::TripState;
use crate::trade::{TradeSession, visit_trading_post};
use crate::wagon::Ration;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("unknown action `{0}`")]
    Unknown(String),
}

/// Commands accepted at the turn prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Travel,
    Rest,
    Hunt,
    Trade,
    Status,
    Save,
    Quit,
}

impl Action {
    pub const ALL: [Self; 7] = [
        Self::Travel,
        Self::Rest,
        Self::Hunt,
        Self::Trade,
        Self::Status,
        Self::Save,
        Self::Quit,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Rest => "rest",
            Self::Hunt => "hunt",
            Self::Trade => "trade",
            Self::Status => "status",
            Self::Save => "save",
            Self::Quit => "quit",
        }
    }

    /// Whether performing the action costs a day.
    #[must_use]
    pub const fn advances_time(self) -> bool {
        matches!(self, Self::Travel | Self::Rest | Self::Hunt | Self::Trade)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.key() == token)
            .ok_or(ActionParseError::Unknown(token))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelReport {
    pub miles: u32,
    pub ration: Ration,
    pub event: Option<EventOutcome>,
    pub hazard_hits: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestReport {
    pub ration: Ration,
    /// Health actually restored across the living party.
    pub healed: u32,
}

/// What a day-advancing action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionReport {
    Travel(TravelReport),
    Rest(RestReport),
    Hunt(HuntOutcome),
    Trade(TradeSession),
}

/// Move down the trail: distance, rations, one event roll, then the
/// separate hazard pass.
pub fn travel(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> TravelReport {
    ctx.say("You decide to travel today.");
    let miles = ctx
        .rng
        .range(ctx.cfg.daily_travel_min, ctx.cfg.daily_travel_max);
    state.wagon.advance_miles(miles);
    state.wagon.advance_days(1);
    ctx.say(&format!("You travel {miles} miles."));

    let ration = state
        .wagon
        .consume_food(&mut state.party, ctx.cfg, ctx.rng, ctx.console);
    let event = random_event(state, ctx);
    let hazard_hits = trail_hazards(state, ctx);
    log::debug!(
        "travel: {miles} mi, day {}, event {:?}, {hazard_hits} hazard hits",
        state.wagon.days,
        event.as_ref().map(EventOutcome::key)
    );

    TravelReport {
        miles,
        ration,
        event,
        hazard_hits,
    }
}

/// Spend a day in camp: eat, then heal every living member.
pub fn rest(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> RestReport {
    ctx.say("You rest for a day, tending to the party.");
    state.wagon.advance_days(1);
    let ration = state
        .wagon
        .consume_food(&mut state.party, ctx.cfg, ctx.rng, ctx.console);

    let mut healed = 0_u32;
    for index in state.party.alive_indices() {
        let amount = ctx.rng.range(REST_HEAL_MIN, REST_HEAL_MAX);
        let before = state.party.member(index).map_or(0, |m| m.health());
        state.party.heal(index, amount);
        let after = state.party.member(index).map_or(0, |m| m.health());
        healed = healed.saturating_add(after.saturating_sub(before));
    }
    if ctx.rng.roll(REST_FLAVOR_CHANCE) {
        ctx.say("Rest helped; morale and health improved.");
    }

    RestReport { ration, healed }
}

/// Run one of the day-advancing actions. Query actions return `None`.
pub fn perform(
    action: Action,
    state: &mut TripState,
    ctx: &mut TurnCtx<'_>,
) -> Option<ActionReport> {
    let report = match action {
        Action::Travel => ActionReport::Travel(travel(state, ctx)),
        Action::Rest => ActionReport::Rest(rest(state, ctx)),
        Action::Hunt => ActionReport::Hunt(resolve_hunt(state, ctx)),
        Action::Trade => ActionReport::Trade(visit_trading_post(state, ctx)),
        Action::Status | Action::Save | Action::Quit => return None,
    };
    Some(report)
}
