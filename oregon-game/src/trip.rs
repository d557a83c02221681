//! The turn loop: render status, take one action, check for the end.

use serde::{Deserialize, Serialize};

use crate::TripStorage;
use crate::actions::{Action, ActionReport, perform};
use crate::config::TrailConfig;
use crate::console::{Console, ask_choice};
use crate::context::TurnCtx;
use crate::party::default_name;
use crate::rng::RandomSource;
use crate::save::SaveRecord;
use crate::state::{LossCause, TripState, TripStatus, TripSummary};

const ACTIONS_LINE: &str = "Actions: travel, rest, hunt, trade, status, save, quit";

/// Result of applying one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "turn", content = "status", rename_all = "snake_case")]
pub enum TurnOutcome {
    Continue,
    Ended(TripStatus),
    Quit,
}

/// A trip in progress: rules, state and the latest classification.
#[derive(Debug, Clone)]
pub struct Trip {
    cfg: TrailConfig,
    state: TripState,
    status: TripStatus,
    last_report: Option<ActionReport>,
}

impl Trip {
    #[must_use]
    pub fn new(cfg: TrailConfig, state: TripState) -> Self {
        let status = state.evaluate(&cfg);
        Self {
            cfg,
            state,
            status,
            last_report: None,
        }
    }

    #[must_use]
    pub const fn cfg(&self) -> &TrailConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn state(&self) -> &TripState {
        &self.state
    }

    #[must_use]
    pub const fn status(&self) -> TripStatus {
        self.status
    }

    /// What the most recent day-advancing action did.
    #[must_use]
    pub const fn last_report(&self) -> Option<&ActionReport> {
        self.last_report.as_ref()
    }

    #[must_use]
    pub fn summary(&self) -> TripSummary {
        self.state.summary(&self.cfg)
    }

    /// Execute one action. Query actions leave the state untouched.
    pub fn apply<S: TripStorage>(
        &mut self,
        action: Action,
        rng: &mut dyn RandomSource,
        console: &mut dyn Console,
        storage: &S,
    ) -> TurnOutcome {
        log::debug!("day {}: {action}", self.state.wagon.days);
        match action {
            Action::Status => {
                console.say(&self.state.wagon.status(&self.cfg));
                console.say(&self.state.party.summary());
                return TurnOutcome::Continue;
            }
            Action::Save => {
                self.save(storage, console);
                return TurnOutcome::Continue;
            }
            Action::Quit => {
                if ask_choice(console, "Save before quitting? (y/n) ") == "y" {
                    self.save(storage, console);
                }
                console.say("Quitting. Goodbye.");
                log::info!("player quit on day {}", self.state.wagon.days);
                return TurnOutcome::Quit;
            }
            Action::Travel | Action::Rest | Action::Hunt | Action::Trade => {}
        }

        let mut ctx = TurnCtx::new(&self.cfg, rng, console);
        self.last_report = perform(action, &mut self.state, &mut ctx);
        self.status = self.state.evaluate(&self.cfg);
        if self.status.is_terminal() {
            log::info!("trip {} on day {}", self.status, self.state.wagon.days);
            TurnOutcome::Ended(self.status)
        } else {
            TurnOutcome::Continue
        }
    }

    /// Run turns until the trip ends or the player quits.
    pub fn play<S: TripStorage>(
        &mut self,
        rng: &mut dyn RandomSource,
        console: &mut dyn Console,
        storage: &S,
    ) -> TurnOutcome {
        loop {
            self.render(console);
            self.status = self.state.evaluate(&self.cfg);
            if self.status.is_terminal() {
                self.announce(console);
                return TurnOutcome::Ended(self.status);
            }

            console.say("");
            console.say(ACTIONS_LINE);
            let reply = console.ask("Choose action: ");
            if reply.is_empty() && console.input_closed() {
                console.say("Input closed. Quitting.");
                log::info!("input closed on day {}", self.state.wagon.days);
                return TurnOutcome::Quit;
            }
            match reply.parse::<Action>() {
                Ok(action) => {
                    if self.apply(action, rng, console, storage) == TurnOutcome::Quit {
                        return TurnOutcome::Quit;
                    }
                }
                Err(err) => {
                    log::debug!("{err}");
                    console.say("Unknown action. Try again.");
                }
            }
        }
    }

    fn render(&self, console: &mut dyn Console) {
        console.say("");
        console.say("--- STATUS ---");
        console.say(&self.state.wagon.status(&self.cfg));
        console.say("");
        console.say("Party:");
        console.say(&self.state.party.summary());
    }

    fn announce(&self, console: &mut dyn Console) {
        match self.status {
            TripStatus::Won => {
                let summary = self.summary();
                console.say("");
                console.say("=== YOU MADE IT TO OREGON! ===");
                console.say("");
                console.say(&format!(
                    "Days: {}  Remaining cash: ${}  Food left: {}",
                    summary.days, summary.cash, summary.food
                ));
                console.say(&format!(
                    "Survivors: {}/{}",
                    summary.survivors, summary.party_size
                ));
            }
            TripStatus::Lost(LossCause::PartyDead) => {
                console.say("All party members have died. The journey ends.");
            }
            TripStatus::Lost(LossCause::Destitute) => {
                console.say("You have run out of supplies and hope. The journey cannot continue.");
            }
            TripStatus::Playing => {}
        }
    }

    fn save<S: TripStorage>(&self, storage: &S, console: &mut dyn Console) {
        match storage.save_trip(&SaveRecord::capture(&self.state)) {
            Ok(()) => match storage.location() {
                Some(location) => console.say(&format!("Game saved to {location}.")),
                None => console.say("Game saved."),
            },
            Err(err) => {
                log::warn!("save failed: {err}");
                console.say(&format!("Could not save the game: {err}"));
            }
        }
    }
}

/// Pre-game prompts: offer to load a save, otherwise name a fresh party.
pub fn setup<S: TripStorage>(
    cfg: &TrailConfig,
    console: &mut dyn Console,
    storage: &S,
) -> TripState {
    if ask_choice(console, "Load existing save? (y/n) ") == "y" {
        if let Some(state) = load_saved(cfg, storage) {
            console.say("Save loaded.");
            return state;
        }
        console.say("No valid save found. Starting new game.");
    }
    TripState::new(name_party(cfg, console), cfg)
}

fn load_saved<S: TripStorage>(cfg: &TrailConfig, storage: &S) -> Option<TripState> {
    let record = match storage.load_trip() {
        Ok(Some(record)) => record,
        Ok(None) => return None,
        Err(err) => {
            log::warn!("could not read save: {err}");
            return None;
        }
    };
    record
        .restore(cfg)
        .inspect_err(|err| log::warn!("rejected save: {err}"))
        .ok()
}

/// Ask for each member's name; blank answers get `Traveler<n>`.
pub fn name_party(cfg: &TrailConfig, console: &mut dyn Console) -> Vec<String> {
    console.say(&format!(
        "Name your party (you + {} companions).",
        cfg.party_size.saturating_sub(1)
    ));
    (1..=cfg.party_size)
        .map(|slot| {
            let name = console.ask(&format!("Name #{slot}: "));
            if name.is_empty() {
                default_name(slot)
            } else {
                name
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::rng::{ScriptedRandom, unit_for};
    use std::cell::RefCell;
    use std::convert::Infallible;

    #[derive(Default)]
    struct SlotStorage {
        slot: RefCell<Option<SaveRecord>>,
        location: Option<String>,
    }

    impl TripStorage for SlotStorage {
        type Error = Infallible;

        fn save_trip(&self, record: &SaveRecord) -> Result<(), Self::Error> {
            *self.slot.borrow_mut() = Some(record.clone());
            Ok(())
        }

        fn load_trip(&self) -> Result<Option<SaveRecord>, Self::Error> {
            Ok(self.slot.borrow().clone())
        }

        fn delete_trip(&self) -> Result<(), Self::Error> {
            self.slot.borrow_mut().take();
            Ok(())
        }

        fn location(&self) -> Option<String> {
            self.location.clone()
        }
    }

    fn fresh_trip() -> Trip {
        let cfg = TrailConfig::default();
        let state = TripState::new(["Ada", "Bo", "Cy", "Di"], &cfg);
        Trip::new(cfg, state)
    }

    #[test]
    fn unknown_actions_reprompt_without_changing_state() {
        let mut trip = fresh_trip();
        let before = trip.state().clone();
        let mut rng = ScriptedRandom::new([]);
        let mut console = ScriptedConsole::new(["dance", "STATUS", "quit", "n"]);
        let storage = SlotStorage::default();

        let outcome = trip.play(&mut rng, &mut console, &storage);

        assert_eq!(outcome, TurnOutcome::Quit);
        assert_eq!(trip.state(), &before);
        assert!(console.mentions("Unknown action. Try again."));
        assert!(console.mentions("Quitting. Goodbye."));
        assert!(storage.slot.borrow().is_none());
    }

    #[test]
    fn quitting_with_save_writes_a_record() {
        let mut trip = fresh_trip();
        let mut rng = ScriptedRandom::new([]);
        let mut console = ScriptedConsole::new(["y"]);
        let storage = SlotStorage::default();

        let outcome = trip.apply(Action::Quit, &mut rng, &mut console, &storage);

        assert_eq!(outcome, TurnOutcome::Quit);
        let saved = storage.slot.borrow().clone().unwrap();
        assert_eq!(saved.party.map(|p| p.len()), Some(4));
    }

    #[test]
    fn save_confirmation_names_the_location() {
        let mut trip = fresh_trip();
        let mut rng = ScriptedRandom::new([]);
        let mut console = ScriptedConsole::default();
        let unnamed = SlotStorage::default();
        let named = SlotStorage {
            location: Some(String::from("ot_save.json")),
            ..SlotStorage::default()
        };

        let _ = trip.apply(Action::Save, &mut rng, &mut console, &unnamed);
        let _ = trip.apply(Action::Save, &mut rng, &mut console, &named);

        assert_eq!(
            console.transcript(),
            ["Game saved.", "Game saved to ot_save.json."]
        );
        assert!(named.slot.borrow().is_some());
    }

    #[test]
    fn final_leg_wins_and_prints_the_banner() {
        let mut trip = fresh_trip();
        trip.state.wagon.miles_traveled = 1990;
        let cfg = trip.cfg().clone();
        let mut rng = ScriptedRandom::new([
            unit_for(12, cfg.daily_travel_min, cfg.daily_travel_max),
            0.9,
        ]);
        let mut console = ScriptedConsole::new(["travel"]);
        let storage = SlotStorage::default();

        let outcome = trip.play(&mut rng, &mut console, &storage);

        assert_eq!(outcome, TurnOutcome::Ended(TripStatus::Won));
        assert!(console.mentions("=== YOU MADE IT TO OREGON! ==="));
        assert!(console.mentions("Survivors: 4/4"));
    }

    #[test]
    fn finished_state_ends_before_any_prompt() {
        let cfg = TrailConfig::default();
        let mut state = TripState::new(["Ada", "Bo", "Cy", "Di"], &cfg);
        for index in 0..4 {
            let _ = state.party.injure(index, 100);
        }
        let mut trip = Trip::new(cfg, state);
        let mut rng = ScriptedRandom::new([]);
        let mut console = ScriptedConsole::default();

        let outcome = trip.play(&mut rng, &mut console, &SlotStorage::default());

        assert_eq!(outcome, TurnOutcome::Ended(TripStatus::Lost(LossCause::PartyDead)));
        assert!(console.prompts().is_empty());
        assert!(console.mentions("All party members have died."));
    }

    #[test]
    fn closed_input_quits_instead_of_spinning() {
        let mut trip = fresh_trip();
        let mut rng = ScriptedRandom::new([]);
        let mut console = ScriptedConsole::default();

        let outcome = trip.play(&mut rng, &mut console, &SlotStorage::default());

        assert_eq!(outcome, TurnOutcome::Quit);
        assert_eq!(console.prompts().len(), 1);
    }

    #[test]
    fn setup_names_the_party_with_defaults() {
        let cfg = TrailConfig::default();
        let mut console = ScriptedConsole::new(["n", "Ada", "", "Cy", ""]);

        let state = setup(&cfg, &mut console, &SlotStorage::default());

        let names: Vec<_> = state.party.members().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["Ada", "Traveler2", "Cy", "Traveler4"]);
        assert!(console.mentions("you + 3 companions"));
    }

    #[test]
    fn setup_falls_back_when_no_save_exists() {
        let cfg = TrailConfig::default();
        let mut console = ScriptedConsole::new(["Y"]);

        let state = setup(&cfg, &mut console, &SlotStorage::default());

        assert!(console.mentions("No valid save found. Starting new game."));
        assert_eq!(state.party.len(), 4);
        assert_eq!(state.wagon.food, 600);
    }

    #[test]
    fn setup_rejects_mismatched_party_and_starts_over() {
        let cfg = TrailConfig::default();
        let storage = SlotStorage::default();
        let short = TripState::new(["Ada", "Bo"], &cfg);
        storage.save_trip(&SaveRecord::capture(&short)).unwrap();
        let mut console = ScriptedConsole::new(["y"]);

        let state = setup(&cfg, &mut console, &storage);

        assert!(console.mentions("No valid save found."));
        assert_eq!(state.party.members()[0].name(), "Traveler1");
    }

    #[test]
    fn setup_loads_a_valid_save() {
        let cfg = TrailConfig::default();
        let storage = SlotStorage::default();
        let mut saved = TripState::new(["Ada", "Bo", "Cy", "Di"], &cfg);
        saved.wagon.miles_traveled = 640;
        storage.save_trip(&SaveRecord::capture(&saved)).unwrap();
        let mut console = ScriptedConsole::new(["y"]);

        let state = setup(&cfg, &mut console, &storage);

        assert!(console.mentions("Save loaded."));
        assert_eq!(state, saved);
    }
}
