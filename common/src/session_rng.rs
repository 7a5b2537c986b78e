use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded random source for a single simulation run. The seed is kept so a
/// run can be recorded and reproduced.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rewinds the sequence to the start of the seed.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.seed = seed;
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.random_range(0..1000u32), b.random_range(0..1000u32));
        }
    }

    #[test]
    fn test_reseed_rewinds() {
        let mut rng = SessionRng::new(99);
        let first: Vec<usize> = (0..8).map(|_| rng.random_range(0..20usize)).collect();
        rng.reseed(99);
        let second: Vec<usize> = (0..8).map(|_| rng.random_range(0..20usize)).collect();
        assert_eq!(first, second);
        assert_eq!(rng.seed(), 99);
    }
}
