use std::time::Duration;
use tokio::time::Instant;

/// Cadence of the reaction countdown.
pub const TICK: Duration = Duration::from_secs(1);

/// One-second deadline tracking for reaction windows.
///
/// The room actor owns this next to the state it times out: armed while the
/// phase counts down, re-armed after each elapsed second, cleared on any
/// transition out of a window. That ownership is what lets a host vanish
/// without freezing the countdown.
#[derive(Debug, Default)]
pub struct Countdown {
    deadline: Option<Instant>,
}

impl Countdown {
    /// Arms the next one-second tick.
    pub fn arm(&mut self) {
        self.deadline = Some(Instant::now() + TICK);
    }
    pub fn clear(&mut self) {
        self.deadline = None;
    }
    pub fn armed(&self) -> bool {
        self.deadline.is_some()
    }
    /// True when unarmed or past the deadline; the caller should re-arm or
    /// clear after handling.
    pub fn spent(&self) -> bool {
        self.deadline.map(|d| Instant::now() >= d).unwrap_or(true)
    }
    /// The instant to sleep until. Far future while unarmed, so a select
    /// branch can poll it unconditionally.
    pub fn fire_at(&self) -> Instant {
        self.deadline
            .unwrap_or_else(|| Instant::now() + Duration::from_secs(3600))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn starts_unarmed_and_spent() {
        let countdown = Countdown::default();
        assert!(!countdown.armed());
        assert!(countdown.spent());
    }
    #[test]
    fn arm_sets_a_live_deadline() {
        let mut countdown = Countdown::default();
        countdown.arm();
        assert!(countdown.armed());
        assert!(!countdown.spent());
        assert!(countdown.fire_at() > Instant::now());
    }
    #[test]
    fn clear_disarms() {
        let mut countdown = Countdown::default();
        countdown.arm();
        countdown.clear();
        assert!(!countdown.armed());
        assert!(countdown.spent());
    }
}
