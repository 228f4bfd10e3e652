//! Random number collaborator.
//!
//! The engine only ever asks for inclusive integer ranges. Sessions own a
//! seeded [`PcgRng`] so that a seed fully determines an encounter; tests can
//! pass any `FnMut(i32, i32) -> i32` instead.

/// Source of inclusive integer ranges.
pub trait CombatRng {
    /// Returns a value in `[min, max]`. Returns `min` when `max <= min`.
    fn range(&mut self, min: i32, max: i32) -> i32;
}

impl<F> CombatRng for F
where
    F: FnMut(i32, i32) -> i32,
{
    fn range(&mut self, min: i32, max: i32) -> i32 {
        self(min, max)
    }
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    #[inline]
    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
    }

    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.step();
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl CombatRng for PcgRng {
    fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        let offset = u64::from(self.next_u32()) % span;
        (i64::from(min) + offset as i64) as i32
    }
}
