//! Transient failure injection
//!
//! The submission service consults a [`FailurePolicy`] once per attempt,
//! before any storage write. The policy is injected so tests can force
//! deterministic outcomes instead of patching process-wide random state.

use rand::Rng;

/// Decides whether a submission attempt is dropped with a retryable
/// failure. Implementations must not keep per-call state: a `true`
/// answer never touches the store.
pub trait FailurePolicy: Send + Sync + std::fmt::Debug {
    fn should_fail(&self) -> bool;
}

/// Fails independently per invocation with the configured probability.
#[derive(Debug, Clone)]
pub struct RandomFailure {
    probability: f64,
}

impl RandomFailure {
    /// `probability` is clamped into `[0.0, 1.0]`; 0.0 never fails,
    /// 1.0 always fails.
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

impl FailurePolicy for RandomFailure {
    fn should_fail(&self) -> bool {
        rand::thread_rng().gen_bool(self.probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_probability_never_fails() {
        let policy = RandomFailure::new(0.0);
        assert!((0..1000).all(|_| !policy.should_fail()));
    }

    #[test]
    fn full_probability_always_fails() {
        let policy = RandomFailure::new(1.0);
        assert!((0..1000).all(|_| policy.should_fail()));
    }

    #[test]
    fn out_of_range_probability_is_clamped() {
        assert!(RandomFailure::new(7.5).should_fail());
        assert!(!RandomFailure::new(-1.0).should_fail());
    }
}
