//! Random Number Sources
//!
//! Every random decision in the engine goes through [`RandomSource`] so the
//! generator can be swapped or scripted. Results depend on the exact order in
//! which draws are consumed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single linear stream of uniform draws.
pub trait RandomSource {
    /// Uniform real, nominally in `[0, 1)`.
    fn uniform_real(&mut self) -> f64;

    /// Uniform integer in `[0, bound)`. `bound` must be non-zero.
    fn uniform_int(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_real(&mut self) -> f64 {
        (**self).uniform_real()
    }

    fn uniform_int(&mut self, bound: usize) -> usize {
        (**self).uniform_int(bound)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform_real(&mut self) -> f64 {
        (**self).uniform_real()
    }

    fn uniform_int(&mut self, bound: usize) -> usize {
        (**self).uniform_int(bound)
    }
}

/// Which generator backs a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RngKind {
    /// `rand`'s SmallRng seeded from a u64
    #[default]
    Small,
    /// glibc-compatible `rand()` stream
    Libc,
}

impl RngKind {
    pub fn name(self) -> &'static str {
        match self {
            RngKind::Small => "small",
            RngKind::Libc => "libc",
        }
    }

    /// Builds a boxed generator of this kind.
    ///
    /// The libc stream takes a 32-bit seed like C `srand`; higher bits are
    /// dropped, which [`SimConfig::validate`](crate::SimConfig::validate) rejects.
    pub fn build(self, seed: u64) -> Box<dyn RandomSource + Send> {
        match self {
            RngKind::Small => Box::new(SimRng::new(seed)),
            RngKind::Libc => Box::new(LibcRand::new(seed as u32)),
        }
    }
}

impl fmt::Display for RngKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RngKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(RngKind::Small),
            "libc" | "glibc" => Ok(RngKind::Libc),
            other => Err(format!("unknown rng kind: {other}")),
        }
    }
}

/// Seeded default generator.
#[derive(Debug, Clone)]
pub struct SimRng(pub SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for SimRng {
    fn uniform_real(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn uniform_int(&mut self, bound: usize) -> usize {
        self.0.gen_range(0..bound)
    }
}

/// Largest value returned by [`LibcRand::next_raw`].
pub const LIBC_RAND_MAX: u32 = 0x7fff_ffff;

const LIBC_DEGREE: usize = 31;
const LIBC_SEPARATION: usize = 3;
const LIBC_WARMUP: usize = 310;
const LIBC_BUFFER: usize = LIBC_DEGREE + LIBC_SEPARATION;

/// Reimplementation of glibc's `srand`/`rand` (additive feedback, degree 31).
///
/// Seeding with the same value as a C program on glibc yields the same
/// sequence, so a run can be compared line for line with that program.
/// `uniform_real` divides by `RAND_MAX` and can therefore return exactly 1.0.
#[derive(Debug, Clone)]
pub struct LibcRand {
    state: [u32; LIBC_BUFFER],
    index: usize,
}

impl LibcRand {
    pub fn new(seed: u32) -> Self {
        let mut state = [0u32; LIBC_BUFFER];
        let seed = if seed == 0 { 1 } else { seed };

        let mut word = seed as i32 as i64;
        state[0] = word as u32;
        for slot in state.iter_mut().take(LIBC_DEGREE).skip(1) {
            // Schrage's method for 16807 * word mod (2^31 - 1)
            let hi = word / 127_773;
            let lo = word % 127_773;
            word = 16_807 * lo - 2_836 * hi;
            if word < 0 {
                word += 2_147_483_647;
            }
            *slot = word as u32;
        }
        for i in LIBC_DEGREE..LIBC_BUFFER {
            state[i] = state[i - LIBC_DEGREE];
        }

        let mut rng = Self {
            state,
            index: LIBC_BUFFER,
        };
        for _ in 0..LIBC_WARMUP {
            rng.advance();
        }
        rng
    }

    fn advance(&mut self) -> u32 {
        let i = self.index;
        let value = self.state[(i - LIBC_DEGREE) % LIBC_BUFFER]
            .wrapping_add(self.state[(i - LIBC_SEPARATION) % LIBC_BUFFER]);
        self.state[i % LIBC_BUFFER] = value;
        self.index = LIBC_BUFFER + (i + 1) % LIBC_BUFFER;
        value
    }

    /// Next value in `[0, LIBC_RAND_MAX]`, identical to C `rand()`.
    pub fn next_raw(&mut self) -> u32 {
        self.advance() >> 1
    }
}

impl RandomSource for LibcRand {
    fn uniform_real(&mut self) -> f64 {
        self.next_raw() as f64 / LIBC_RAND_MAX as f64
    }

    fn uniform_int(&mut self, bound: usize) -> usize {
        self.next_raw() as usize % bound
    }
}

/// Replays fixed sequences; used to pin individual decisions in tests.
///
/// Reals and integers are kept in separate queues. When a queue runs dry the
/// last value is repeated (reals default to `0.999`, integers to `0`).
#[cfg(any(test, feature = "test-fixtures"))]
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    reals: Vec<f64>,
    ints: Vec<usize>,
    real_pos: usize,
    int_pos: usize,
}

#[cfg(any(test, feature = "test-fixtures"))]
impl ScriptedRng {
    pub fn new(reals: Vec<f64>, ints: Vec<usize>) -> Self {
        Self {
            reals,
            ints,
            real_pos: 0,
            int_pos: 0,
        }
    }

    /// Number of reals consumed so far.
    pub fn reals_drawn(&self) -> usize {
        self.real_pos
    }

    /// Number of integers consumed so far.
    pub fn ints_drawn(&self) -> usize {
        self.int_pos
    }
}

#[cfg(any(test, feature = "test-fixtures"))]
impl RandomSource for ScriptedRng {
    fn uniform_real(&mut self) -> f64 {
        let value = self
            .reals
            .get(self.real_pos)
            .or(self.reals.last())
            .copied()
            .unwrap_or(0.999);
        self.real_pos += 1;
        value
    }

    fn uniform_int(&mut self, bound: usize) -> usize {
        let value = self
            .ints
            .get(self.int_pos)
            .or(self.ints.last())
            .copied()
            .unwrap_or(0);
        self.int_pos += 1;
        value % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_libc_rand_matches_glibc_seed_one() {
        let mut rng = LibcRand::new(1);
        let values: Vec<u32> = (0..5).map(|_| rng.next_raw()).collect();
        assert_eq!(
            values,
            vec![1804289383, 846930886, 1681692777, 1714636915, 1957747793]
        );
    }

    #[test]
    fn test_libc_rand_zero_seed_behaves_like_one() {
        let mut a = LibcRand::new(0);
        let mut b = LibcRand::new(1);
        for _ in 0..50 {
            assert_eq!(a.next_raw(), b.next_raw());
        }
    }

    #[test]
    fn test_libc_rand_stays_in_range() {
        let mut rng = LibcRand::new(42);
        for _ in 0..10_000 {
            let real = rng.uniform_real();
            assert!((0.0..=1.0).contains(&real));
            assert!(rng.uniform_int(4) < 4);
        }
    }

    #[test]
    fn test_sim_rng_determinism() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.uniform_real(), b.uniform_real());
            assert_eq!(a.uniform_int(100), b.uniform_int(100));
        }
    }

    #[test]
    fn test_sim_rng_ranges() {
        let mut rng = SimRng::new(7);
        for _ in 0..10_000 {
            let real = rng.uniform_real();
            assert!((0.0..1.0).contains(&real));
            assert!(rng.uniform_int(4) < 4);
        }
    }

    #[test]
    fn test_scripted_rng_replays_and_repeats_last() {
        let mut rng = ScriptedRng::new(vec![0.1, 0.2], vec![3, 1]);
        assert_eq!(rng.uniform_real(), 0.1);
        assert_eq!(rng.uniform_real(), 0.2);
        assert_eq!(rng.uniform_real(), 0.2);
        assert_eq!(rng.uniform_int(4), 3);
        assert_eq!(rng.uniform_int(4), 1);
        assert_eq!(rng.uniform_int(4), 1);
        assert_eq!(rng.reals_drawn(), 3);
        assert_eq!(rng.ints_drawn(), 3);
    }

    #[test]
    fn test_rng_kind_parse() {
        assert_eq!("small".parse::<RngKind>().unwrap(), RngKind::Small);
        assert_eq!("glibc".parse::<RngKind>().unwrap(), RngKind::Libc);
        assert!("mt19937".parse::<RngKind>().is_err());
        assert_eq!(RngKind::build(RngKind::Libc, 1).uniform_int(1), 0);
    }
}
