//! Random number capability shared by the event and action engines.
//!
//! Every random decision on the trail goes through [`RandomSource`], so a trip
//! replays exactly given the same sequence of unit draws.

use hmac::{Hmac, Mac};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;
use std::collections::VecDeque;

use crate::numbers::{u64_to_f64, unit_to_offset};

/// A source of uniform draws in `[0, 1)`.
///
/// The helpers each consume exactly one draw, which keeps scripted sequences
/// easy to line up with the branches they drive.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Inclusive integer draw in `min..=max`. Bounds are swapped if inverted.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = u64::from(hi - lo) + 1;
        let offset = unit_to_offset(self.next_unit(), span);
        lo.saturating_add(u32::try_from(offset).unwrap_or(hi - lo))
    }

    /// True when the draw lands below `chance`.
    fn roll(&mut self, chance: f64) -> bool {
        self.next_unit() < chance
    }

    /// Uniform index into a collection of `len` items; `None` when empty.
    /// Empty collections do not consume a draw.
    fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let span = u64::try_from(len).unwrap_or(u64::MAX);
        let offset = unit_to_offset(self.next_unit(), span);
        usize::try_from(offset).ok()
    }
}

/// Production random source: a seeded `ChaCha20` stream with a draw counter.
#[derive(Debug, Clone)]
pub struct TrailRng {
    rng: ChaCha20Rng,
    seed: u64,
    draws: u64,
}

impl TrailRng {
    /// Construct the stream from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(derive_stream_seed(seed, b"trail")),
            seed,
            draws: 0,
        }
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draws performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for TrailRng {
    fn next_unit(&mut self) -> f64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.r#gen::<f64>()
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()) else {
        return user_seed;
    };
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let mut seed_bytes = [0_u8; 8];
    seed_bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed_bytes)
}

/// Replays a fixed sequence of unit draws, then repeats `fallback`.
///
/// Values are clamped into `[0, 1)` as they are queued.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    queue: VecDeque<f64>,
    fallback: f64,
    draws: u64,
}

impl ScriptedRandom {
    /// Fallback used once the script runs dry: high enough that no chance
    /// roll succeeds and no event band matches.
    pub const DEFAULT_FALLBACK: f64 = 0.999;

    #[must_use]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self {
            queue: values.into_iter().map(clamp_unit).collect(),
            fallback: Self::DEFAULT_FALLBACK,
            draws: 0,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = clamp_unit(fallback);
        self
    }

    /// Append further draws to the script.
    pub fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = f64>,
    {
        self.queue.extend(values.into_iter().map(clamp_unit));
    }

    /// Scripted draws not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.draws = self.draws.saturating_add(1);
        self.queue.pop_front().unwrap_or(self.fallback)
    }
}

/// Unit value that makes [`RandomSource::range`] return `value` for `min..=max`.
///
/// Handy for scripting exact rolls in tests and automated play.
#[must_use]
pub fn unit_for(value: u32, min: u32, max: u32) -> f64 {
    if max <= min {
        return 0.0;
    }
    let span = u64_to_f64(u64::from(max - min) + 1);
    let offset = u64_to_f64(u64::from(value.clamp(min, max) - min));
    (offset + 0.5) / span
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0 - f64::EPSILON)
}
