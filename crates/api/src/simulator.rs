//! Random outcome generator standing in for the real classifier.

use rand::Rng;
use vislog_core::analysis::AnalysisResult;

/// Message returned for a simulated failure.
pub const FAILURE_MESSAGE: &str = "Error:E50012";

/// Share of requests answered with a failure by default.
pub const DEFAULT_FAILURE_RATE: f64 = 0.2;

/// Produces success or failure envelopes at a fixed failure rate.
#[derive(Debug, Clone)]
pub struct Simulator {
    failure_rate: f64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(DEFAULT_FAILURE_RATE)
    }
}

impl Simulator {
    /// `failure_rate` is clamped to `[0, 1]`; NaN falls back to the default.
    pub fn new(failure_rate: f64) -> Self {
        let failure_rate = if failure_rate.is_nan() {
            DEFAULT_FAILURE_RATE
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        Self { failure_rate }
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    /// Draw one outcome. Successes carry a class in `1..=5` and a
    /// confidence in `[0.7, 0.99]` rounded to four decimals.
    pub fn simulate<R: Rng>(&self, rng: &mut R) -> AnalysisResult {
        if rng.random::<f64>() < self.failure_rate {
            return AnalysisResult::failure(FAILURE_MESSAGE);
        }

        let class = rng.random_range(1..=5_i64);
        let confidence = (rng.random_range(0.7..=0.99_f64) * 10_000.0).round() / 10_000.0;
        AnalysisResult::success(class, confidence)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn zero_failure_rate_always_succeeds() {
        let simulator = Simulator::new(0.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let result = simulator.simulate(&mut rng);
            let classification = result.classification().expect("success carries data");
            assert!((1..=5).contains(&classification.class));
            assert!((0.7..=0.99).contains(&classification.confidence));
            let scaled = classification.confidence * 10_000.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
            assert_eq!(result.message, "success");
        }
    }

    #[test]
    fn full_failure_rate_always_fails() {
        let simulator = Simulator::new(1.0);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let result = simulator.simulate(&mut rng);
            assert_eq!(result, AnalysisResult::failure(FAILURE_MESSAGE));
        }
    }

    #[test]
    fn failure_rate_is_clamped() {
        assert_eq!(Simulator::new(-0.5).failure_rate(), 0.0);
        assert_eq!(Simulator::new(3.0).failure_rate(), 1.0);
        assert_eq!(Simulator::new(f64::NAN).failure_rate(), DEFAULT_FAILURE_RATE);
    }
}
