/// Small seeded PRNG used wherever palstream needs reproducible randomness.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Create a generator from a seed. Equal seeds yield equal sequences.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Draw a seed from the system clock for runs that did not request one.
    pub fn seed_from_clock() -> u64 {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(nanos ^ u64::from(std::process::id())).next_u64()
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        // SplitMix64
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform value in `[0, bound)`. Returns 0 when `bound == 0`.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        ((u128::from(self.next_u64()) * u128::from(bound)) >> 64) as u64
    }
}

/// Pick `count` distinct values from `[0, bound)` (Floyd's algorithm), returned sorted.
pub(crate) fn sample_distinct(rng: &mut Rng64, bound: u64, count: u64) -> Vec<u64> {
    let count = count.min(bound);
    let mut picked = std::collections::BTreeSet::new();
    for j in (bound - count)..bound {
        let t = rng.next_below(j + 1);
        if !picked.insert(t) {
            picked.insert(j);
        }
    }
    picked.into_iter().collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
