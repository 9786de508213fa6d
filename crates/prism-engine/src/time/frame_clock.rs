use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the clock was created (or last reset).
    ///
    /// This is the value uploaded to the time uniform.
    pub elapsed: f32,

    /// Time elapsed since the previous tick, in seconds (clamped).
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// `elapsed` is never clamped; it follows wall-clock time so animations stay in
/// phase. Only `dt` is clamped, to avoid pathological values after a debugger
/// pause or a minimized window.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps (0.1 ms ..= 250 ms).
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline. `elapsed` restarts from zero.
    pub fn reset(&mut self) {
        let now = Instant::now();
        self.start = now;
        self.last = now;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_counts_up_from_zero() {
        let mut clock = FrameClock::new();
        let base = clock.start;
        assert_eq!(clock.tick_at(base).frame_index, 0);
        assert_eq!(clock.tick_at(base).frame_index, 1);
        assert_eq!(clock.tick_at(base).frame_index, 2);
    }

    fn test_clock() -> FrameClock {
        FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(100))
    }

    #[test]
    fn dt_is_clamped_to_minimum() {
        let mut clock = test_clock();
        let base = clock.start;
        let ft = clock.tick_at(base);
        assert!((ft.dt - 0.001).abs() < 1e-6);
    }

    #[test]
    fn dt_is_clamped_to_maximum() {
        let mut clock = test_clock();
        let base = clock.start;
        let ft = clock.tick_at(base + Duration::from_secs(5));
        assert!((ft.dt - 0.1).abs() < 1e-6);
    }

    #[test]
    fn elapsed_is_not_clamped() {
        let mut clock = test_clock();
        let base = clock.start;
        let ft = clock.tick_at(base + Duration::from_secs(5));
        assert!((ft.elapsed - 5.0).abs() < 1e-6);
    }

    #[test]
    fn reset_restarts_elapsed() {
        let mut clock = FrameClock::new();
        clock.reset();
        let base = clock.start;
        let ft = clock.tick_at(base + Duration::from_millis(500));
        assert!((ft.elapsed - 0.5).abs() < 1e-6);
    }
}
