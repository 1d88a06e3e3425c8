use serde::{Deserialize, Serialize};

/// Milliseconds one nominal frame advances the simulation clock.
///
/// Tick deltas are nominal frame counts, so games convert them to simulated
/// milliseconds with `dt * NOMINAL_FRAME_MS` when driving timers.
pub const NOMINAL_FRAME_MS: f32 = 1000.0 / 60.0;

/// Repeating timer advanced by fixed tick deltas.
///
/// Timers are plain state values: they serialize with the game snapshot and
/// are dropped with it, so a reset cancels every outstanding timer by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalTimer {
    period_ms: f32,
    elapsed_ms: f32,
}

impl IntervalTimer {
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Advance by `dt_ms`; returns true when the period elapses. The
    /// overshoot is retained so long ticks do not lose schedule time.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            true
        } else {
            false
        }
    }
}

/// One-shot countdown advanced by fixed tick deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_ms: f32,
}

impl Countdown {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            remaining_ms: duration_ms,
        }
    }

    /// Advance by `dt_ms`; returns true on the step the countdown expires
    /// (and never again afterwards).
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if self.remaining_ms <= 0.0 {
            return false;
        }
        self.remaining_ms -= dt_ms;
        self.remaining_ms <= 0.0
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ms <= 0.0
    }

    pub fn remaining_ms(&self) -> f32 {
        self.remaining_ms.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_fires_on_period() {
        let mut timer = IntervalTimer::new(100.0);
        assert!(!timer.tick(60.0));
        assert!(timer.tick(60.0));
    }

    #[test]
    fn interval_retains_overshoot() {
        let mut timer = IntervalTimer::new(100.0);
        assert!(timer.tick(150.0));
        // 50 ms carried over, so another 50 ms completes the next period.
        assert!(timer.tick(50.0));
    }

    #[test]
    fn countdown_fires_exactly_once() {
        let mut cd = Countdown::new(30.0);
        assert!(!cd.tick(20.0));
        assert!(cd.tick(20.0));
        assert!(!cd.tick(20.0));
        assert!(cd.is_expired());
    }

    #[test]
    fn countdown_remaining_never_negative() {
        let mut cd = Countdown::new(10.0);
        cd.tick(100.0);
        assert_eq!(cd.remaining_ms(), 0.0);
    }

    #[test]
    fn timers_roundtrip_through_snapshot() {
        let mut timer = IntervalTimer::new(600.0);
        timer.tick(200.0);
        let bytes = rmp_serde::to_vec(&timer).unwrap();
        let restored: IntervalTimer = rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(timer, restored);
    }
}
