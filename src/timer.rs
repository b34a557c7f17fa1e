//! Per-level countdown.
//!
//! Each `start` hands out a new [`TimerHandle`]. Ticks are delivered with the
//! handle of the interval that produced them, so a tick from an interval that
//! was replaced by a restart is recognised and dropped.

/// Identifies one run of the countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerHandle(u64);

/// What a tick did to the countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Stale handle or countdown not running.
    Ignored,
    Remaining(u32),
    /// Hit zero on this tick. Reported once per run.
    Expired,
}

#[derive(Debug, Default)]
pub struct Countdown {
    generation: u64,
    active: Option<TimerHandle>,
    remaining: u32,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fresh run of `seconds`, invalidating any previous handle.
    pub fn start(&mut self, seconds: u32) -> TimerHandle {
        self.generation += 1;
        let handle = TimerHandle(self.generation);
        self.active = Some(handle);
        self.remaining = seconds;
        handle
    }

    /// Invalidates the current handle without starting a new run.
    pub fn stop(&mut self) {
        self.active = None;
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_handle(&self) -> Option<TimerHandle> {
        self.active
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn tick(&mut self, handle: TimerHandle) -> Tick {
        if self.active != Some(handle) {
            return Tick::Ignored;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = None;
            Tick::Expired
        } else {
            Tick::Remaining(self.remaining)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_exactly_once() {
        let mut c = Countdown::new();
        let h = c.start(50);
        let expired = (0..60).filter(|_| c.tick(h) == Tick::Expired).count();
        assert_eq!(expired, 1);
        assert!(!c.is_running());
    }

    #[test]
    fn test_counts_down() {
        let mut c = Countdown::new();
        let h = c.start(3);
        assert_eq!(c.tick(h), Tick::Remaining(2));
        assert_eq!(c.tick(h), Tick::Remaining(1));
        assert_eq!(c.tick(h), Tick::Expired);
        assert_eq!(c.tick(h), Tick::Ignored);
    }

    #[test]
    fn test_restart_invalidates_old_handle() {
        let mut c = Countdown::new();
        let old = c.start(5);
        c.tick(old);
        let new = c.start(5);
        assert_ne!(old, new);
        assert_eq!(c.tick(old), Tick::Ignored);
        assert_eq!(c.remaining(), 5);
        assert_eq!(c.tick(new), Tick::Remaining(4));
    }

    #[test]
    fn test_stop_ignores_ticks() {
        let mut c = Countdown::new();
        let h = c.start(5);
        c.stop();
        assert_eq!(c.tick(h), Tick::Ignored);
        assert_eq!(c.active_handle(), None);
    }
}
