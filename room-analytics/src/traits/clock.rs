//! Wall-clock capability.

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Source of the current instant.
///
/// The normalizer substitutes "now" for the end of sessions that have not
/// ended. Taking the clock as a capability keeps normalization deterministic
/// under test: pass a [`FixedClock`] instead of the [`SystemClock`].
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_always_returns_the_same_instant() {
        let instant = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let clock = FixedClock(instant);

        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn test_clock_is_usable_through_references_and_arcs() {
        let instant = Utc.timestamp_opt(42, 0).unwrap();
        let shared: Arc<dyn Clock> = Arc::new(FixedClock(instant));

        assert_eq!((&shared).now(), instant);
        assert_eq!(shared.now(), instant);
    }
}
