//! Capabilities threaded through every action and event for one turn.

use crate::config::TrailConfig;
use crate::console::Console;
use crate::rng::RandomSource;

pub struct TurnCtx<'a> {
    pub cfg: &'a TrailConfig,
    pub rng: &'a mut dyn RandomSource,
    pub console: &'a mut dyn Console,
}

impl<'a> TurnCtx<'a> {
    pub fn new(
        cfg: &'a TrailConfig,
        rng: &'a mut dyn RandomSource,
        console: &'a mut dyn Console,
    ) -> Self {
        Self { cfg, rng, console }
    }

    /// Shorthand for narrating one line.
    pub fn say(&mut self, line: &str) {
        self.console.say(line);
    }
}
