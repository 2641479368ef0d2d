use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of the two kinds of draws the simulator makes
pub trait TelemetryRng {
    /// Uniform real in the half-open range `[low, high)`.
    fn uniform_real(&mut self, low: f64, high: f64) -> f64;

    /// Uniform integer in the closed range `[low, high]`.
    fn uniform_int(&mut self, low: u32, high: u32) -> u32;
}

impl<R: TelemetryRng + ?Sized> TelemetryRng for &mut R {
    fn uniform_real(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform_real(low, high)
    }

    fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        (**self).uniform_int(low, high)
    }
}

impl<R: TelemetryRng + ?Sized> TelemetryRng for Box<R> {
    fn uniform_real(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform_real(low, high)
    }

    fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        (**self).uniform_int(low, high)
    }
}

fn sample_real<G: Rng>(rng: &mut G, low: f64, high: f64) -> f64 {
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}

fn sample_int<G: Rng>(rng: &mut G, low: u32, high: u32) -> u32 {
    if high > low {
        rng.gen_range(low..=high)
    } else {
        low
    }
}

/// Unseeded generator backed by `rand::thread_rng`
#[derive(Debug, Default)]
pub struct ThreadRandom {
    rng: ThreadRng,
}

impl ThreadRandom {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TelemetryRng for ThreadRandom {
    fn uniform_real(&mut self, low: f64, high: f64) -> f64 {
        sample_real(&mut self.rng, low, high)
    }

    fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        sample_int(&mut self.rng, low, high)
    }
}

/// Reproducible generator: the same seed always yields the same session
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TelemetryRng for SeededRandom {
    fn uniform_real(&mut self, low: f64, high: f64) -> f64 {
        sample_real(&mut self.rng, low, high)
    }

    fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        sample_int(&mut self.rng, low, high)
    }
}

/// Replays caller-supplied values in order.
///
/// Scripted values are clamped into the requested range. Once a queue runs
/// dry every further draw returns the range's low bound.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    reals: VecDeque<f64>,
    ints: VecDeque<u32>,
}

impl ScriptedRandom {
    pub fn new<F, I>(reals: F, ints: I) -> Self
    where
        F: IntoIterator<Item = f64>,
        I: IntoIterator<Item = u32>,
    {
        Self {
            reals: reals.into_iter().collect(),
            ints: ints.into_iter().collect(),
        }
    }

    #[cfg(test)]
    pub fn remaining_reals(&self) -> usize {
        self.reals.len()
    }

    #[cfg(test)]
    pub fn remaining_ints(&self) -> usize {
        self.ints.len()
    }
}

impl TelemetryRng for ScriptedRandom {
    fn uniform_real(&mut self, low: f64, high: f64) -> f64 {
        match self.reals.pop_front() {
            Some(v) => v.clamp(low, high),
            None => low,
        }
    }

    fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        match self.ints.pop_front() {
            Some(v) => v.clamp(low, high),
            None => low,
        }
    }
}

/// Fixed-value source, handy for long runs where only the shape matters
#[derive(Debug, Clone, Copy)]
pub struct ConstantRandom {
    real: f64,
    int: u32,
}

impl ConstantRandom {
    /// Every real draw returns `real`, every integer draw returns `int`.
    pub fn new(real: f64, int: u32) -> Self {
        Self { real, int }
    }
}

impl TelemetryRng for ConstantRandom {
    fn uniform_real(&mut self, low: f64, high: f64) -> f64 {
        self.real.clamp(low, high)
    }

    fn uniform_int(&mut self, low: u32, high: u32) -> u32 {
        self.int.clamp(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);
        for _ in 0..50 {
            assert_eq!(a.uniform_real(-1.5, 2.5), b.uniform_real(-1.5, 2.5));
            assert_eq!(a.uniform_int(25, 39), b.uniform_int(25, 39));
        }
    }

    #[test]
    fn test_seeded_draws_stay_in_range() {
        let mut rng = SeededRandom::new(42);
        for _ in 0..1_000 {
            let r = rng.uniform_real(-1.5, 2.5);
            assert!((-1.5..2.5).contains(&r));
            let i = rng.uniform_int(25, 39);
            assert!((25..=39).contains(&i));
        }
    }

    #[test]
    fn test_thread_random_in_range() {
        let mut rng = ThreadRandom::new();
        for _ in 0..200 {
            assert!((25..=39).contains(&rng.uniform_int(25, 39)));
        }
    }

    #[test]
    fn test_scripted_replays_then_falls_back_to_low() {
        let mut rng = ScriptedRandom::new([1.0, -1.0], [30]);
        assert_eq!(rng.uniform_real(-1.5, 2.5), 1.0);
        assert_eq!(rng.uniform_real(-1.5, 2.5), -1.0);
        assert_eq!(rng.uniform_real(-1.5, 2.5), -1.5);
        assert_eq!(rng.uniform_int(25, 39), 30);
        assert_eq!(rng.uniform_int(25, 39), 25);
        assert_eq!(rng.remaining_reals(), 0);
        assert_eq!(rng.remaining_ints(), 0);
    }

    #[test]
    fn test_scripted_clamps_out_of_range_values() {
        let mut rng = ScriptedRandom::new([10.0], [99]);
        assert_eq!(rng.uniform_real(-1.5, 2.5), 2.5);
        assert_eq!(rng.uniform_int(25, 39), 39);
    }

    #[test]
    fn test_degenerate_ranges_return_low() {
        let mut rng = SeededRandom::new(1);
        assert_eq!(rng.uniform_real(3.0, 3.0), 3.0);
        assert_eq!(rng.uniform_int(5, 5), 5);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn draw<R: TelemetryRng>(mut rng: R) -> (f64, u32) {
            (rng.uniform_real(-1.5, 2.5), rng.uniform_int(25, 39))
        }

        let mut inner = ScriptedRandom::new([0.5, 1.0], [26, 27]);
        assert_eq!(draw(&mut inner), (0.5, 26));
        assert_eq!(draw(&mut inner), (1.0, 27));
        assert_eq!(inner.remaining_reals(), 0);
    }
}
