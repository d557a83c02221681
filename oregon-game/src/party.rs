//! The traveling party: a fixed, ordered roster of travelers.

use crate::config::TrailConfig;
use crate::console::Console;
use crate::numbers::count_to_u32;
use crate::person::{Injury, Person};
use crate::rng::RandomSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    members: Vec<Person>,
}

impl Party {
    /// Everyone starts alive at full health, in the order given.
    #[must_use]
    pub fn from_names<I, S>(names: I, max_health: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = names
            .into_iter()
            .map(|name| Person::new(name, max_health))
            .collect();
        Self { members }
    }

    /// Party of `cfg.party_size` default-named travelers.
    #[must_use]
    pub fn with_default_names(cfg: &TrailConfig) -> Self {
        Self::from_names((1..=cfg.party_size).map(default_name), cfg.max_health)
    }

    #[must_use]
    pub const fn from_members(members: Vec<Person>) -> Self {
        Self { members }
    }

    #[must_use]
    pub fn members(&self) -> &[Person] {
        &self.members
    }

    #[must_use]
    pub fn member(&self, index: usize) -> Option<&Person> {
        self.members.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Living members in roster order.
    pub fn alive_members(&self) -> impl Iterator<Item = &Person> {
        self.members.iter().filter(|member| member.is_alive())
    }

    /// Roster positions of the living, computed fresh on every call.
    #[must_use]
    pub fn alive_indices(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, member)| member.is_alive())
            .map(|(index, _)| index)
            .collect()
    }

    #[must_use]
    pub fn alive_count(&self) -> u32 {
        count_to_u32(self.alive_members().count())
    }

    #[must_use]
    pub fn all_dead(&self) -> bool {
        self.alive_members().next().is_none()
    }

    /// One status line per member, dead included, in roster order.
    #[must_use]
    pub fn summary(&self) -> String {
        self.members
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Choose a living member uniformly at random from the current roster.
    pub fn pick_alive(&self, rng: &mut dyn RandomSource) -> Option<usize> {
        let alive = self.alive_indices();
        rng.pick(alive.len()).and_then(|slot| alive.get(slot).copied())
    }

    /// Damage the member at `index`; out-of-range indices are ignored.
    pub fn injure(&mut self, index: usize, amount: u32) -> Injury {
        self.members
            .get_mut(index)
            .map_or(Injury::Unaffected, |member| member.injure(amount))
    }

    /// Damage a member and announce the death if this blow was fatal.
    pub fn injure_and_report(
        &mut self,
        index: usize,
        amount: u32,
        console: &mut dyn Console,
    ) -> Injury {
        let injury = self.injure(index, amount);
        if injury.is_fatal() {
            self.report_death(index, console);
        }
        injury
    }

    /// Kill a member outright, announcing it. Returns false if already dead.
    pub fn kill(&mut self, index: usize, console: &mut dyn Console) -> bool {
        let died = self.members.get_mut(index).is_some_and(Person::die);
        if died {
            self.report_death(index, console);
        }
        died
    }

    pub fn heal(&mut self, index: usize, amount: u32) {
        if let Some(member) = self.members.get_mut(index) {
            member.heal(amount);
        }
    }

    fn report_death(&self, index: usize, console: &mut dyn Console) {
        if let Some(member) = self.members.get(index) {
            log::debug!("party member {index} ({}) died", member.name());
            console.say(&format!("{} has died.", member.name()));
        }
    }
}

/// Name used when the player leaves a party slot blank (1-based).
#[must_use]
pub fn default_name(slot: usize) -> String {
    format!("Traveler{slot}")
}
