use std::time::{Duration, Instant};

const PERIOD: Duration = Duration::from_secs(1);

/// One-second periodic schedule polled by the host.
///
/// There is at most one schedule per `Countdown`: `start` replaces whatever
/// was running, and `cancel` drops it, after which `due_ticks` yields nothing.
#[derive(Debug, Default, Clone)]
pub struct Countdown {
    anchor: Option<Instant>,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: Instant) {
        self.anchor = Some(now);
    }

    pub fn cancel(&mut self) {
        self.anchor = None;
    }

    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    /// Whole periods elapsed since the last accounted tick. The anchor moves
    /// forward by exactly that many periods so fractional time carries over.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        let Some(anchor) = self.anchor else {
            return 0;
        };
        let elapsed = now.saturating_duration_since(anchor);
        let ticks = (elapsed.as_millis() / PERIOD.as_millis()) as u32;
        if ticks > 0 {
            self.anchor = Some(anchor + PERIOD * ticks);
        }
        ticks
    }

    /// Time left until the next tick is due.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.anchor
            .map(|anchor| (anchor + PERIOD).saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_countdown_never_ticks() {
        let mut cd = Countdown::new();
        assert!(!cd.is_running());
        assert_eq!(cd.due_ticks(Instant::now() + Duration::from_secs(5)), 0);
    }

    #[test]
    fn fractional_seconds_carry_over() {
        let t0 = Instant::now();
        let mut cd = Countdown::new();
        cd.start(t0);
        assert_eq!(cd.due_ticks(t0 + Duration::from_millis(900)), 0);
        assert_eq!(cd.due_ticks(t0 + Duration::from_millis(1500)), 1);
        assert_eq!(cd.due_ticks(t0 + Duration::from_millis(1999)), 0);
        assert_eq!(cd.due_ticks(t0 + Duration::from_millis(4000)), 3);
    }

    #[test]
    fn restart_replaces_schedule() {
        let t0 = Instant::now();
        let mut cd = Countdown::new();
        cd.start(t0);
        cd.start(t0 + Duration::from_millis(2500));
        assert_eq!(cd.due_ticks(t0 + Duration::from_millis(3000)), 0);
        assert_eq!(cd.due_ticks(t0 + Duration::from_millis(3500)), 1);
    }

    #[test]
    fn cancel_stops_ticks() {
        let t0 = Instant::now();
        let mut cd = Countdown::new();
        cd.start(t0);
        cd.cancel();
        assert_eq!(cd.due_ticks(t0 + Duration::from_secs(10)), 0);
        assert_eq!(cd.until_next(t0), None);
    }
}
