//! Oregon Trail Game Engine
//!
//! Turn-based survival simulation for a wagon party crossing to Oregon.
//! The crate holds every rule of the trail; terminal input, save files and
//! randomness are reached only through the capabilities it defines.

pub mod actions;
pub mod config;
pub mod console;
pub mod constants;
pub mod context;
pub mod crossings;
pub mod events;
pub mod hazards;
pub mod hunt;
pub mod numbers;
pub mod party;
pub mod person;
pub mod rng;
pub mod save;
pub mod state;
pub mod trade;
pub mod trip;
pub mod wagon;

// Re-export commonly used types
pub use actions::{Action, ActionParseError, ActionReport, RestReport, TravelReport};
pub use config::{ConfigError, StartingSupplies, TrailConfig};
pub use console::{Console, ScriptedConsole};
pub use context::TurnCtx;
pub use crossings::{CrossingChoice, CrossingOutcome, CrossingResult};
pub use events::{EventKind, EventOutcome, Repair};
pub use hunt::HuntOutcome;
pub use party::Party;
pub use person::{Injury, Person};
pub use rng::{RandomSource, ScriptedRandom, TrailRng};
pub use save::{PartyEntry, SaveError, SaveRecord};
pub use state::{LossCause, TripState, TripStatus, TripSummary};
pub use trade::{Prices, Purchase, TradeGood, TradeSession};
pub use trip::{Trip, TurnOutcome, name_party, setup};
pub use wagon::{Part, Ration, Wagon};

/// Trait for abstracting save/load operations.
/// Platform-specific implementations decide where the record lives.
pub trait TripStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist `record`, replacing any previous save.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save_trip(&self, record: &SaveRecord) -> Result<(), Self::Error>;

    /// Load the current save, `None` when nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns an error if a save exists but cannot be read.
    fn load_trip(&self) -> Result<Option<SaveRecord>, Self::Error>;

    /// Remove the current save, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be removed.
    fn delete_trip(&self) -> Result<(), Self::Error>;

    /// Where saves land, for the player-facing confirmation.
    fn location(&self) -> Option<String> {
        None
    }
}

/// Main engine: pairs the trail rules with a storage backend.
pub struct TrailEngine<S>
where
    S: TripStorage,
{
    cfg: TrailConfig,
    storage: S,
}

impl<S> TrailEngine<S>
where
    S: TripStorage,
{
    pub const fn new(cfg: TrailConfig, storage: S) -> Self {
        Self { cfg, storage }
    }

    pub const fn cfg(&self) -> &TrailConfig {
        &self.cfg
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Run the pre-game prompts and hand back a trip ready to play.
    pub fn start(&self, console: &mut dyn Console) -> Trip {
        let state = setup(&self.cfg, console, &self.storage);
        Trip::new(self.cfg.clone(), state)
    }

    /// Start a fresh trip with the given names, skipping every prompt.
    pub fn start_with_names<I, N>(&self, names: I) -> Trip
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Trip::new(self.cfg.clone(), TripState::new(names, &self.cfg))
    }

    /// Prompt, then play to the end.
    pub fn run(&self, rng: &mut dyn RandomSource, console: &mut dyn Console) -> TurnOutcome {
        let mut trip = self.start(console);
        trip.play(rng, console, &self.storage)
    }
}
