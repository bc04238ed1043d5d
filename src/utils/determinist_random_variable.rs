/*!
# Determinist Random Variable

This module provides a way to create random variables with a deterministic behavior. This is
useful to have a reproducible behavior.

The factory is created with a global seed, and each random variable created with this factory
will have a unique seed, to have a different series of random numbers. Two runs using the
same global seed and creating their variables in the same order draw exactly the same noise.
 */

use std::sync::Mutex;

use rand::{Rng, SeedableRng, random};
use rand_chacha::ChaCha8Rng;

use super::distributions::normal::DeterministNormalRandomVariable;

/// Factory to create random variables with a deterministic behavior, using a global seed.
#[derive(Debug)]
pub struct DeterministRandomVariableFactory {
    /// Global run seed.
    global_seed: Mutex<f32>,
    seed_generator: Mutex<ChaCha8Rng>,
}

impl DeterministRandomVariableFactory {
    /// Create a new factory with the given `global_seed`.
    pub fn new(global_seed: f32) -> Self {
        Self {
            global_seed: Mutex::new(global_seed),
            seed_generator: Mutex::new(ChaCha8Rng::seed_from_u64(global_seed.to_bits() as u64)),
        }
    }

    fn next_local_seed(&self) -> f32 {
        self.seed_generator.lock().unwrap().r#gen::<f32>() * 1000000.
    }

    /// Create a new zero-mean normal random variable.
    pub fn make_normal(&self) -> DeterministNormalRandomVariable {
        DeterministNormalRandomVariable::new(self.next_local_seed())
    }

    pub fn set_global_seed(&self, seed: f32) {
        *self.global_seed.lock().unwrap() = seed;
        *self.seed_generator.lock().unwrap() = ChaCha8Rng::seed_from_u64(seed.to_bits() as u64);
    }

    pub fn global_seed(&self) -> f32 {
        *self.global_seed.lock().unwrap()
    }
}

impl Default for DeterministRandomVariableFactory {
    fn default() -> Self {
        Self::new(random::<f32>() * 1000000.)
    }
}

#[cfg(test)]
mod tests {
    use super::DeterministRandomVariableFactory;

    #[test]
    fn same_seed_same_series() {
        let f1 = DeterministRandomVariableFactory::new(42.);
        let f2 = DeterministRandomVariableFactory::new(42.);
        let mut a1 = f1.make_normal();
        let mut a2 = f2.make_normal();
        for _ in 0..100 {
            assert_eq!(a1.generate(1.5).to_bits(), a2.generate(1.5).to_bits());
        }
    }

    #[test]
    fn variables_differ_within_a_factory() {
        let factory = DeterministRandomVariableFactory::new(42.);
        let mut a = factory.make_normal();
        let mut b = factory.make_normal();
        let series_a: Vec<f64> = (0..10).map(|_| a.generate(1.)).collect();
        let series_b: Vec<f64> = (0..10).map(|_| b.generate(1.)).collect();
        assert_ne!(series_a, series_b);
    }

    #[test]
    fn reseeding_restarts_the_series() {
        let factory = DeterministRandomVariableFactory::new(3.);
        let first = factory.make_normal().generate(1.);
        factory.set_global_seed(3.);
        assert_eq!(factory.global_seed(), 3.);
        assert_eq!(factory.make_normal().generate(1.).to_bits(), first.to_bits());
    }
}
