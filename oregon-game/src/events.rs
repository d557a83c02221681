//! Random trail events: one roll per day of travel, six cumulative bands.

use serde::{Deserialize, Serialize};

use crate::constants::{
    AXLE_REPAIR_DAYS, AXLE_STRANDED_FOOD_LOSS, BOUNTY_CASH_MAX, BOUNTY_CASH_MIN,
    EVENT_BOUNTY_BAND, EVENT_RIVER_BAND, EVENT_SICKNESS_BAND, EVENT_THIEVES_BAND,
    EVENT_WAGON_BREAK_BAND, ILLNESSES, SICKNESS_DAMAGE_MAX, SICKNESS_DAMAGE_MIN, THIEF_CASH_MAX,
    THIEF_CASH_MIN, THIEF_FOOD_MAX, THIEF_FOOD_MIN, TONGUE_REPAIR_DAYS, WHEEL_REPAIR_DAMAGE_MAX,
    WHEEL_REPAIR_DAMAGE_MIN, WHEEL_REPAIR_DAYS, WHEEL_REPAIR_INJURY_CHANCE,
};
use crate::context::TurnCtx;
use crate::crossings::{CrossingOutcome, resolve_river};
use crate::hazards::hazard_pass;
use crate::person::Injury;
use crate::rng::RandomSource;
use crate::state::TripState;
use crate::wagon::Part;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Sickness,
    WagonBreak,
    RiverCrossing,
    Thieves,
    Bounty,
}

impl EventKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Sickness => "sickness",
            Self::WagonBreak => "wagon_break",
            Self::RiverCrossing => "river_crossing",
            Self::Thieves => "thieves",
            Self::Bounty => "bounty",
        }
    }
}

/// Cumulative upper bounds; a draw at or above the last band is a quiet day.
const EVENT_BANDS: [(f64, EventKind); 5] = [
    (EVENT_SICKNESS_BAND, EventKind::Sickness),
    (EVENT_WAGON_BREAK_BAND, EventKind::WagonBreak),
    (EVENT_RIVER_BAND, EventKind::RiverCrossing),
    (EVENT_THIEVES_BAND, EventKind::Thieves),
    (EVENT_BOUNTY_BAND, EventKind::Bounty),
];

/// Map a unit draw onto an event band.
#[must_use]
pub fn event_for_roll(roll: f64) -> Option<EventKind> {
    EVENT_BANDS
        .iter()
        .find(|(upper, _)| roll < *upper)
        .map(|(_, kind)| *kind)
}

/// Draw once and pick today's event, if any.
pub fn roll_event(rng: &mut dyn RandomSource) -> Option<EventKind> {
    let roll = rng.next_unit();
    let kind = event_for_roll(roll);
    log::debug!("event roll {roll:.4} -> {kind:?}");
    kind
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "repair", rename_all = "snake_case")]
pub enum Repair {
    UsedSpare,
    /// No spare: time (and maybe food) lost to field repairs.
    Improvised { days: u32, food_lost: u32, injured: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventOutcome {
    /// The event had nobody to affect.
    Quiet,
    Sickness {
        victim: String,
        illness: String,
        damage: u32,
        died: bool,
    },
    WagonBreak { part: Part, repair: Repair },
    RiverCrossing(CrossingOutcome),
    Thieves { cash_lost: u32, food_lost: u32 },
    Bounty { cash_found: u32 },
}

impl EventOutcome {
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Sickness { .. } => EventKind::Sickness.key(),
            Self::WagonBreak { .. } => EventKind::WagonBreak.key(),
            Self::RiverCrossing(_) => EventKind::RiverCrossing.key(),
            Self::Thieves { .. } => EventKind::Thieves.key(),
            Self::Bounty { .. } => EventKind::Bounty.key(),
        }
    }
}

/// Roll for an event and resolve it. Called once per travel day.
pub fn random_event(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> Option<EventOutcome> {
    let kind = roll_event(ctx.rng)?;
    Some(resolve_event(kind, state, ctx))
}

/// Apply a specific event to the party and wagon.
pub fn resolve_event(kind: EventKind, state: &mut TripState, ctx: &mut TurnCtx<'_>) -> EventOutcome {
    match kind {
        EventKind::Sickness => sickness(state, ctx),
        EventKind::WagonBreak => wagon_break(state, ctx),
        EventKind::RiverCrossing => EventOutcome::RiverCrossing(resolve_river(state, ctx)),
        EventKind::Thieves => thieves(state, ctx),
        EventKind::Bounty => bounty(state, ctx),
    }
}

fn sickness(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> EventOutcome {
    let Some(victim) = state.party.pick_alive(ctx.rng) else {
        return EventOutcome::Quiet;
    };
    let illness = ctx
        .rng
        .pick(ILLNESSES.len())
        .and_then(|slot| ILLNESSES.get(slot))
        .copied()
        .unwrap_or(ILLNESSES[0]);
    let name = state
        .party
        .member(victim)
        .map(|m| m.name().to_string())
        .unwrap_or_default();
    ctx.say(&format!("{name} fell ill with {illness}."));

    let damage = ctx.rng.range(SICKNESS_DAMAGE_MIN, SICKNESS_DAMAGE_MAX);
    let injury = state.party.injure_and_report(victim, damage, ctx.console);
    if let Injury::Wounded { .. } = injury {
        ctx.say(&format!("{name} lost {damage} hp."));
    }
    EventOutcome::Sickness {
        victim: name,
        illness: illness.to_string(),
        damage,
        died: injury.is_fatal(),
    }
}

fn wagon_break(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> EventOutcome {
    let part = ctx
        .rng
        .pick(Part::ALL.len())
        .and_then(|slot| Part::ALL.get(slot))
        .copied()
        .unwrap_or(Part::Wheel);
    ctx.say(&format!("Your wagon broke: a {} is damaged.", part.label()));

    if state.wagon.use_spare(part) {
        ctx.say(&format!("You used a spare {} to repair it.", part.label()));
        return EventOutcome::WagonBreak {
            part,
            repair: Repair::UsedSpare,
        };
    }

    let repair = match part {
        Part::Wheel => {
            ctx.say("No spare wheels! Repairs take time.");
            state.wagon.advance_days(WHEEL_REPAIR_DAYS);
            let injured = hazard_pass(
                state,
                ctx,
                WHEEL_REPAIR_INJURY_CHANCE,
                WHEEL_REPAIR_DAMAGE_MIN,
                WHEEL_REPAIR_DAMAGE_MAX,
            );
            Repair::Improvised {
                days: WHEEL_REPAIR_DAYS,
                food_lost: 0,
                injured,
            }
        }
        Part::Axle => {
            ctx.say("No spare axles. You lose time and food.");
            state.wagon.advance_days(AXLE_REPAIR_DAYS);
            let food_lost = state.wagon.lose_food(AXLE_STRANDED_FOOD_LOSS);
            ctx.say(&format!("You lost {food_lost} food while stranded."));
            Repair::Improvised {
                days: AXLE_REPAIR_DAYS,
                food_lost,
                injured: 0,
            }
        }
        Part::Tongue => {
            ctx.say("No spare tongues. Slow repairs required.");
            state.wagon.advance_days(TONGUE_REPAIR_DAYS);
            Repair::Improvised {
                days: TONGUE_REPAIR_DAYS,
                food_lost: 0,
                injured: 0,
            }
        }
    };
    EventOutcome::WagonBreak { part, repair }
}

fn thieves(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> EventOutcome {
    let cash_wanted = ctx.rng.range(THIEF_CASH_MIN, THIEF_CASH_MAX);
    let food_wanted = ctx.rng.range(THIEF_FOOD_MIN, THIEF_FOOD_MAX);
    let cash_lost = state.wagon.lose_cash(cash_wanted);
    let food_lost = state.wagon.lose_food(food_wanted);
    ctx.say(&format!(
        "Thieves stole ${cash_lost} and {food_lost} food during the night."
    ));
    EventOutcome::Thieves {
        cash_lost,
        food_lost,
    }
}

fn bounty(state: &mut TripState, ctx: &mut TurnCtx<'_>) -> EventOutcome {
    let cash_found = ctx.rng.range(BOUNTY_CASH_MIN, BOUNTY_CASH_MAX);
    state.wagon.cash = state.wagon.cash.saturating_add(cash_found);
    ctx.say(&format!("You found a hidden stash: +${cash_found}."));
    EventOutcome::Bounty { cash_found }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrailConfig;
    use crate::console::ScriptedConsole;
    use crate::rng::{ScriptedRandom, unit_for};

    fn state(cfg: &TrailConfig) -> TripState {
        TripState::new(["Ada", "Bo", "Cy", "Di"], cfg)
    }

    #[test]
    fn bands_follow_cumulative_table() {
        assert_eq!(event_for_roll(0.0), Some(EventKind::Sickness));
        assert_eq!(event_for_roll(0.079), Some(EventKind::Sickness));
        assert_eq!(event_for_roll(0.08), Some(EventKind::WagonBreak));
        assert_eq!(event_for_roll(0.15), Some(EventKind::RiverCrossing));
        assert_eq!(event_for_roll(0.20), Some(EventKind::Thieves));
        assert_eq!(event_for_roll(0.25), Some(EventKind::Bounty));
        assert_eq!(event_for_roll(0.26), None);
        assert_eq!(event_for_roll(0.99), None);
    }

    #[test]
    fn quiet_day_changes_nothing() {
        let cfg = TrailConfig::default();
        let mut state = state(&cfg);
        let before = state.clone();
        let mut rng = ScriptedRandom::new([0.5]);
        let mut console = ScriptedConsole::default();
        let mut ctx = TurnCtx::new(&cfg, &mut rng, &mut console);

        assert!(random_event(&mut state, &mut ctx).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn sickness_names_the_illness_and_damage() {
        let cfg = TrailConfig::default();
        let mut state = state(&cfg);
        let mut rng = ScriptedRandom::new([
            0.01,
            0.6,
            0.9,
            unit_for(25, SICKNESS_DAMAGE_MIN, SICKNESS_DAMAGE_MAX),
        ]);
        let mut console = ScriptedConsole::default();
        let mut ctx = TurnCtx::new(&cfg, &mut rng, &mut console);

        let outcome = random_event(&mut state, &mut ctx);

        assert_eq!(
            outcome,
            Some(EventOutcome::Sickness {
                victim: String::from("Cy"),
                illness: String::from("dysentery"),
                damage: 25,
                died: false,
            })
        );
        assert_eq!(state.party.members()[2].health(), 75);
        assert!(console.mentions("Cy fell ill with dysentery."));
        assert!(console.mentions("Cy lost 25 hp."));
    }

    #[test]
    fn fatal_sickness_announces_death_instead_of_damage() {
        let cfg = TrailConfig::default();
        let mut state = state(&cfg);
        let _ = state.party.injure(0, 95);
        let mut rng = ScriptedRandom::new([0.0, 0.0, 0.0]);
        let mut console = ScriptedConsole::default();
        let mut ctx = TurnCtx::new(&cfg, &mut rng, &mut console);

        let outcome = resolve_event(EventKind::Sickness, &mut state, &mut ctx);

        assert!(matches!(outcome, EventOutcome::Sickness { died: true, .. }));
        assert!(console.mentions("Ada has died."));
        assert!(!console.mentions("lost 10 hp"));
    }

    #[test]
    fn breakdown_uses_spare_when_available() {
        let cfg = TrailConfig::default();
        let mut state = state(&cfg);
        let mut rng = ScriptedRandom::new([0.0]);
        let mut console = ScriptedConsole::default();
        let mut ctx = TurnCtx::new(&cfg, &mut rng, &mut console);

        let outcome = resolve_event(EventKind::WagonBreak, &mut state, &mut ctx);

        assert_eq!(
            outcome,
            EventOutcome::WagonBreak {
                part: Part::Wheel,
                repair: Repair::UsedSpare
            }
        );
        assert_eq!(state.wagon.spare_wheels, 1);
        assert_eq!(state.wagon.days, 0);
    }

    #[test]
    fn missing_wheel_costs_a_day_and_risks_injury() {
        let cfg = TrailConfig::default();
        let mut state = state(&cfg);
        state.wagon.spare_wheels = 0;
        let mut rng = ScriptedRandom::new([
            0.0,
            0.1,
            unit_for(8, WHEEL_REPAIR_DAMAGE_MIN, WHEEL_REPAIR_DAMAGE_MAX),
            0.5,
            0.5,
            0.5,
        ]);
        let mut console = ScriptedConsole::default();
        let mut ctx = TurnCtx::new(&cfg, &mut rng, &mut console);

        let outcome = resolve_event(EventKind::WagonBreak, &mut state, &mut ctx);

        assert_eq!(
            outcome,
            EventOutcome::WagonBreak {
                part: Part::Wheel,
                repair: Repair::Improvised {
                    days: 1,
                    food_lost: 0,
                    injured: 1
                }
            }
        );
        assert_eq!(state.wagon.days, 1);
        assert_eq!(state.party.members()[0].health(), 92);
    }

    #[test]
    fn missing_axle_strands_the_wagon() {
        let cfg = TrailConfig::default();
        let mut state = state(&cfg);
        state.wagon.spare_axles = 0;
        state.wagon.food = 12;
        let mut rng = ScriptedRandom::new([0.5]);
        let mut console = ScriptedConsole::default();
        let mut ctx = TurnCtx::new(&cfg, &mut rng, &mut console);

        let outcome = resolve_event(EventKind::WagonBreak, &mut state, &mut ctx);

        assert_eq!(
            outcome,
            EventOutcome::WagonBreak {
                part: Part::Axle,
                repair: Repair::Improvised {
                    days: 2,
                    food_lost: 12,
                    injured: 0
                }
            }
        );
        assert_eq!((state.wagon.days, state.wagon.food), (2, 0));
    }

    #[test]
    fn missing_tongue_only_costs_time() {
        let cfg = TrailConfig::default();
        let mut state = state(&cfg);
        state.wagon.spare_tongues = 0;
        let mut rng = ScriptedRandom::new([0.9]);
        let mut console = ScriptedConsole::default();
        let mut ctx = TurnCtx::new(&cfg, &mut rng, &mut console);

        let _ = resolve_event(EventKind::WagonBreak, &mut state, &mut ctx);

        assert_eq!(state.wagon.days, 1);
        assert_eq!(state.wagon.food, 600);
    }

    #[test]
    fn thieves_cannot_take_more_than_exists() {
        let cfg = TrailConfig::default();
        let mut state = state(&cfg);
        state.wagon.cash = 15;
        state.wagon.food = 300;
        let mut rng = ScriptedRandom::new([
            unit_for(40, THIEF_CASH_MIN, THIEF_CASH_MAX),
            unit_for(55, THIEF_FOOD_MIN, THIEF_FOOD_MAX),
        ]);
        let mut console = ScriptedConsole::default();
        let mut ctx = TurnCtx::new(&cfg, &mut rng, &mut console);

        let outcome = resolve_event(EventKind::Thieves, &mut state, &mut ctx);

        assert_eq!(
            outcome,
            EventOutcome::Thieves {
                cash_lost: 15,
                food_lost: 55
            }
        );
        assert_eq!((state.wagon.cash, state.wagon.food), (0, 245));
    }

    #[test]
    fn bounty_adds_cash() {
        let cfg = TrailConfig::default();
        let mut state = state(&cfg);
        let mut rng = ScriptedRandom::new([0.23, unit_for(33, BOUNTY_CASH_MIN, BOUNTY_CASH_MAX)]);
        let mut console = ScriptedConsole::default();
        let mut ctx = TurnCtx::new(&cfg, &mut rng, &mut console);

        let outcome = random_event(&mut state, &mut ctx);

        assert_eq!(outcome, Some(EventOutcome::Bounty { cash_found: 33 }));
        assert_eq!(state.wagon.cash, 233);
        assert!(console.mentions("+$33"));
    }
}
