//! Pseudo-random source for simulated access patterns.
//!
//! The engine draws page choices, logical offsets, and modified-bit coin
//! flips from a [`RandomSource`] injected at construction and seeded exactly
//! once per process, before any worker starts. The default implementation is
//! a xorshift generator, avoiding the overhead of a full RNG; tests
//! substitute scripted sources to pin down eviction order exactly.

/// Source of pseudo-random draws for the access loop.
pub trait RandomSource: Send {
    /// Returns the next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Returns a value uniformly below `bound`.
    ///
    /// Callers only draw page indices and offsets for jobs known to be
    /// non-empty, so `bound` is always positive.
    fn below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        self.next_u64() % bound
    }

    /// Flips a fair coin.
    fn coin(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }
}

/// Xorshift pseudo-random generator.
#[derive(Debug, Clone)]
pub struct XorShiftRng {
    /// Internal generator state, never zero.
    state: u64,
}

impl XorShiftRng {
    /// Creates a generator from a seed.
    ///
    /// A zero seed is replaced with a fixed nonzero constant: the all-zero
    /// state is a fixed point of the xorshift step.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }
}

impl RandomSource for XorShiftRng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}
