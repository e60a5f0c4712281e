use core::cell::Cell;
use web_time::{Instant, SystemTime, UNIX_EPOCH};

/// Milliseconds on a monotonic time line.
pub type Tick = u64;

/// Source of timestamps for the game timer. Readings must never go backwards.
pub trait Clock {
    fn now(&self) -> Tick;
}

/// Real monotonic clock.
///
/// Readings start at the wall-clock time of construction (milliseconds since
/// the UNIX epoch) and then advance with [`Instant`], so they never jump
/// backwards when the system clock is adjusted but still differ between runs.
#[derive(Copy, Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
    base: Tick,
}

impl MonotonicClock {
    pub fn new() -> Self {
        let base = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|since_epoch| since_epoch.as_millis() as Tick)
            .unwrap_or_default();
        Self {
            origin: Instant::now(),
            base,
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Tick {
        self.base
            .saturating_add(self.origin.elapsed().as_millis() as Tick)
    }
}

/// Clock that only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<Tick>,
}

impl ManualClock {
    pub fn new(start: Tick) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Moves the clock to `tick`, ignoring requests to go back in time.
    pub fn set(&self, tick: Tick) {
        self.now.set(self.now.get().max(tick));
    }

    pub fn advance(&self, millis: Tick) {
        self.now.set(self.now.get().saturating_add(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Tick {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Tick {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
        assert!(first > 0);
    }

    #[test]
    fn manual_clock_moves_forward_only() {
        let clock = ManualClock::new(100);
        clock.advance(50);
        assert_eq!(clock.now(), 150);
        clock.set(120);
        assert_eq!(clock.now(), 150);
        clock.set(2_000);
        assert_eq!(clock.now(), 2_000);
    }
}
