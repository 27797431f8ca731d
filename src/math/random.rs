//! Seeded 32-bit random stream
//!
//! A Weyl sequence increment followed by xor-shift/multiply mixing gives
//! full avalanche on a single word of state. The sequence is a pure function
//! of the seed and the number of draws taken.

/// Odd increment added to the state before every draw
pub const WEYL_INCREMENT: u32 = 0x6D2B_79F5;

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Advance `state` once and return the uniform draw in `[0, 1)` with the successor state
pub const fn next_draw(state: u32) -> (f64, u32) {
    let next_state = state.wrapping_add(WEYL_INCREMENT);
    let mut t = next_state;
    t = (t ^ (t >> 15)).wrapping_mul(t | 1);
    t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
    let mixed = t ^ (t >> 14);
    (mixed as f64 / TWO_POW_32, next_state)
}

/// Deterministic uniform random stream owned by a single job
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Create a stream starting from `seed`
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Draw the next uniform value in `[0, 1)`
    pub const fn next_f64(&mut self) -> f64 {
        let (value, next_state) = next_draw(self.state);
        self.state = next_state;
        value
    }

    /// Draw a uniform index in `0..bound`
    ///
    /// Returns 0 when `bound` is 0.
    pub fn next_index(&mut self, bound: usize) -> usize {
        let scaled = (self.next_f64() * bound as f64).floor() as usize;
        scaled.min(bound.saturating_sub(1))
    }
}
