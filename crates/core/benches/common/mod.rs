use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTier {
    Quick,
    Full,
}

impl BenchTier {
    pub fn from_env() -> Self {
        match env::var("WORDMAZE_BENCH_TIER").as_deref() {
            Ok("full") => Self::Full,
            _ => Self::Quick,
        }
    }
}

/// Deterministic xorshift generator for synthetic pages.
#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in `[min, max]`.
    pub fn jitter(&mut self, min: f64, max: f64) -> f64 {
        let n = self.next_u64() as f64 / u64::MAX as f64;
        min + (max - min) * n
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = (self.next_u64() % (i as u64 + 1)) as usize;
            items.swap(i, j);
        }
    }
}
