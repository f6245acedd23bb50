use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Shape of the randomized pause between browser and network actions.
///
/// Pauses are drawn from a normal distribution around `mean` and never go
/// below `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterSettings {
    pub min: Duration,
    pub mean: Duration,
    pub std_dev: Duration,
}

impl Default for JitterSettings {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(1500),
            mean: Duration::from_secs(4),
            std_dev: Duration::from_secs(1),
        }
    }
}

pub trait DelaySource {
    fn next_delay(&mut self) -> Duration;
}

pub struct GaussianJitter {
    settings: JitterSettings,
    rng: StdRng,
}

impl GaussianJitter {
    pub fn new(settings: JitterSettings) -> Self {
        Self {
            settings,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(settings: JitterSettings, seed: u64) -> Self {
        Self {
            settings,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DelaySource for GaussianJitter {
    fn next_delay(&mut self) -> Duration {
        let JitterSettings { min, mean, std_dev } = self.settings;
        // Both parameters come from durations, so they are finite and non-negative.
        let secs = Normal::new(mean.as_secs_f64(), std_dev.as_secs_f64())
            .map(|normal| normal.sample(&mut self.rng))
            .unwrap_or(mean.as_secs_f64());
        Duration::from_secs_f64(secs.max(min.as_secs_f64()))
    }
}

/// Always the same pause. Used for tests and for disabling jitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDelay(pub Duration);

impl DelaySource for FixedDelay {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}

/// Blocking pause used by the browser scroll loop.
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
