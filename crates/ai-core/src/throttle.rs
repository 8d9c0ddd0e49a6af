/// Interval gate on the logical clock.
///
/// A fresh (or reset) throttle lets the first call through; afterwards a call passes only once
/// `now - last >= interval_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    interval_ms: u64,
    last: Option<u64>,
}

impl Throttle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last(&self) -> Option<u64> {
        self.last
    }

    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }

    /// Returns `true` and records `now_ms` when due.
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        if !self.is_due(now_ms) {
            return false;
        }
        self.last = Some(now_ms);
        true
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_interval_boundaries() {
        let mut t = Throttle::new(100);
        assert!(t.try_fire(0));
        assert!(!t.try_fire(50));
        assert!(!t.try_fire(99));
        assert!(t.try_fire(100));
        assert!(!t.try_fire(150));
        assert!(t.try_fire(260));
    }

    #[test]
    fn zero_interval_fires_every_call() {
        let mut t = Throttle::new(0);
        assert!(t.try_fire(5));
        assert!(t.try_fire(5));
    }

    #[test]
    fn reset_rearms_first_fire() {
        let mut t = Throttle::new(1_000);
        assert!(t.try_fire(10));
        t.reset();
        assert!(t.try_fire(11));
    }
}
