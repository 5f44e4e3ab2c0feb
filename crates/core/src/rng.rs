//! RNG module - injectable random source for fill, refill and reshuffle
//!
//! Every random decision the engine makes (kind picks, figurine rolls, the
//! refill wildcard) goes through [`RandomSource`], so a fixed seed or a scripted
//! source reproduces a whole session exactly.

/// Source of randomness consumed by the engine.
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits of [`next_u32`](RandomSource::next_u32) (multiply-shift),
    /// which behaves better than `%` for LCG output. Returns 0 when `max` is 0.
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// True with the given probability in percent.
    fn roll_percent(&mut self, percent: u32) -> bool {
        self.next_range(100) < percent
    }

    /// Pick one element uniformly, or `None` for an empty slice.
    fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_range(items.len() as u32) as usize;
        items.get(idx).copied()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of raw values, cycling when exhausted.
///
/// Handy in tests that need to force a particular branch (e.g. a figurine roll).
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Raw value that makes `next_range(max)` return `target`.
    pub fn value_for(target: u32, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Smallest v with (v * max) >> 32 == target, nudged to the middle of the bucket.
        let bucket = (1u64 << 32) / max as u64;
        (target as u64 * bucket + bucket / 2) as u32
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
