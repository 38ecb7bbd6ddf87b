//! Politeness rate limit for remote lookups: consecutive calls to the wrapped source are
//! at least `min_interval` apart. Only network lookups are throttled: cache hits never reach
//! the source and local sources (`is_remote() == false`) are passed straight through.
use crate::Thermodynamics::DBhandlers::lookup_api::{
    LookupError, SpeciesLookupSource, SpeciesRecord,
};
use log::debug;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// sleeps until `min_interval` has passed since the last `mark`; returns the time slept
    pub fn wait(&mut self) -> Duration {
        let Some(last) = self.last else {
            return Duration::ZERO;
        };
        let elapsed = last.elapsed();
        if elapsed >= self.min_interval {
            return Duration::ZERO;
        }
        let pause = self.min_interval - elapsed;
        debug!("throttling remote lookup for {:?}", pause);
        thread::sleep(pause);
        pause
    }

    /// records the end of a remote call
    pub fn mark(&mut self) {
        self.last = Some(Instant::now());
    }
}

/// lookup source decorator applying a `Throttle` before every remote call
pub struct ThrottledSource<S: SpeciesLookupSource> {
    inner: S,
    throttle: Throttle,
}

impl<S: SpeciesLookupSource> ThrottledSource<S> {
    pub fn new(inner: S, min_interval: Duration) -> Self {
        Self {
            inner,
            throttle: Throttle::new(min_interval),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SpeciesLookupSource> SpeciesLookupSource for ThrottledSource<S> {
    fn lookup(&mut self, formula: &str) -> Result<SpeciesRecord, LookupError> {
        if !self.inner.is_remote() {
            return self.inner.lookup(formula);
        }
        self.throttle.wait();
        let result = self.inner.lookup(formula);
        self.throttle.mark();
        result
    }

    fn is_remote(&self) -> bool {
        self.inner.is_remote()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_is_not_delayed() {
        let mut throttle = Throttle::new(Duration::from_secs(60));
        assert_eq!(throttle.wait(), Duration::ZERO);
    }

    #[test]
    fn test_consecutive_calls_are_spaced() {
        let interval = Duration::from_millis(40);
        let mut throttle = Throttle::new(interval);
        let start = Instant::now();
        throttle.wait();
        throttle.mark();
        let slept = throttle.wait();
        throttle.mark();
        assert!(slept > Duration::ZERO);
        assert!(start.elapsed() >= interval);
    }

    #[test]
    fn test_zero_interval_never_sleeps() {
        let mut throttle = Throttle::new(Duration::ZERO);
        throttle.mark();
        assert_eq!(throttle.wait(), Duration::ZERO);
    }
}
