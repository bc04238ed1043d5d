use rand::{SeedableRng, distributions::Distribution};
use rand_chacha::ChaCha8Rng;
use statrs::distribution::Normal;

/// Zero-mean normal random variable whose standard deviation is given at each draw.
///
/// The generator is owned by the variable, so the series only depends on the
/// seed and on the number of (non degenerate) draws.
#[derive(Debug, Clone)]
pub struct DeterministNormalRandomVariable {
    /// Seed used, computed by the factory from the global seed.
    my_seed: f32,
    rng: ChaCha8Rng,
}

impl DeterministNormalRandomVariable {
    pub fn new(my_seed: f32) -> Self {
        Self {
            my_seed,
            rng: ChaCha8Rng::seed_from_u64(my_seed.to_bits() as u64),
        }
    }

    /// Draw a sample of `N(0, std_dev)`.
    ///
    /// A non positive or non finite `std_dev` gives exactly 0 and does not
    /// advance the generator.
    pub fn generate(&mut self, std_dev: f64) -> f64 {
        if !(std_dev > 0.) || !std_dev.is_finite() {
            return 0.;
        }
        match Normal::new(0., std_dev) {
            Ok(nd) => nd.sample(&mut self.rng),
            Err(_) => 0.,
        }
    }

    /// Restart the series from the seed.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.my_seed.to_bits() as u64);
    }
}
