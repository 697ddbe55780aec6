//! Xorshift pseudo-random generator.
//!
//! Drives device arrival and request costs. A tiny deterministic generator keeps runs
//! reproducible for a given seed.

/// Fallback state used when a zero seed is supplied (zero is a fixed point of xorshift).
const DEFAULT_STATE: u64 = 123_456_789;

/// 64-bit xorshift generator.
#[derive(Debug, Clone)]
pub struct XorShift {
    state: u64,
}

impl XorShift {
    /// Creates a generator from `seed`.
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_STATE } else { seed },
        }
    }

    /// Produces the next 64-bit value.
    pub const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Returns `true` with probability `1 / n`. `n == 0` never fires, `n == 1` always does.
    pub const fn one_in(&mut self, n: u32) -> bool {
        match n {
            0 => false,
            1 => true,
            _ => self.next_u64() % n as u64 == 0,
        }
    }

    /// Uniform value in `1..=max` (`max` raised to at least 1).
    pub const fn between_one_and(&mut self, max: u32) -> u32 {
        let max = if max == 0 { 1 } else { max };
        (self.next_u64() % max as u64) as u32 + 1
    }
}
