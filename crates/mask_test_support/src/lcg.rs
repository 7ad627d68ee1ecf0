//! Seeded generator for reproducible pseudo-random edit sequences.

#[derive(Clone, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state
    }

    /// Uniform-ish index in `0..upper`; 0 when `upper` is 0.
    pub fn gen_range(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        (self.next_u64() >> 32) as usize % upper
    }

    /// Index in `start..=end`.
    pub fn gen_inclusive(&mut self, start: usize, end: usize) -> usize {
        assert!(start <= end, "invalid range: {start}..={end}");
        start + self.gen_range(end - start + 1)
    }

    pub fn gen_ratio(&mut self, numerator: u32, denominator: u32) -> bool {
        assert!(denominator > 0, "invalid denominator: {denominator}");
        (self.gen_range(denominator as usize) as u32) < numerator
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "pick from empty slice");
        &items[self.gen_range(items.len())]
    }
}
