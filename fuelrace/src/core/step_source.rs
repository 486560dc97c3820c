use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// (km) Smallest distance a vehicle advances within one race step.
pub const MIN_STEP_KM: u32 = 10;
/// (km) Exclusive upper bound of the distance a vehicle advances within one race step.
pub const MAX_STEP_KM: u32 = 200;

/// StepSource decides which participant advances in a race step and by how far. The race engine
/// only talks to this trait, so races can be driven by a random number generator as well as by a
/// predetermined script.
pub trait StepSource {
    /// Returns the index of the participant to advance, in [0, no_participants).
    fn pick_participant(&mut self, no_participants: usize) -> usize;

    /// (km) Returns the distance the picked participant advances.
    fn step_distance(&mut self) -> f64;
}

/// RandomSteps picks participants uniformly (with replacement) and draws whole step distances
/// uniformly from [MIN_STEP_KM, MAX_STEP_KM).
#[derive(Debug)]
pub struct RandomSteps<'a, R: Rng> {
    rng: &'a mut R,
}

impl<'a, R: Rng> RandomSteps<'a, R> {
    pub fn new(rng: &'a mut R) -> RandomSteps<'a, R> {
        RandomSteps { rng }
    }
}

impl<'a, R: Rng> StepSource for RandomSteps<'a, R> {
    fn pick_participant(&mut self, no_participants: usize) -> usize {
        self.rng.gen_range(0..no_participants)
    }

    fn step_distance(&mut self) -> f64 {
        self.rng.gen_range(MIN_STEP_KM..MAX_STEP_KM) as f64
    }
}

/// seeded_rng returns a reproducible random number generator for the inserted seed.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_steps_stay_within_bounds() {
        let mut rng = seeded_rng(7);
        let mut steps = RandomSteps::new(&mut rng);

        for _ in 0..1000 {
            let d = steps.step_distance();
            assert!(d >= MIN_STEP_KM as f64 && d < MAX_STEP_KM as f64);
            assert_eq!(d.fract(), 0.0);
            assert!(steps.pick_participant(6) < 6);
        }
    }

    #[test]
    fn equal_seeds_give_equal_steps() {
        let mut rng_a = seeded_rng(42);
        let mut rng_b = seeded_rng(42);
        let mut a = RandomSteps::new(&mut rng_a);
        let mut b = RandomSteps::new(&mut rng_b);

        for _ in 0..50 {
            assert_eq!(a.pick_participant(4), b.pick_participant(4));
            assert_eq!(a.step_distance(), b.step_distance());
        }
    }
}
