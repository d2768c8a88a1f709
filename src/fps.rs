use crate::constants::FPS_UPDATE_INTERVAL_SECS;
use std::time::{Duration, Instant};

/// Counts frames and reports the average rate once per interval.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    interval: Duration,
    frames: u32,
    window_start: Instant,
    current: f64,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self::with_interval(now, Duration::from_secs_f64(FPS_UPDATE_INTERVAL_SECS))
    }

    pub fn with_interval(now: Instant, interval: Duration) -> Self {
        Self {
            interval,
            frames: 0,
            window_start: now,
            current: 0.0,
        }
    }

    /// Records one frame. Returns the new rate when an interval has elapsed.
    pub fn record_frame(&mut self, now: Instant) -> Option<f64> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < self.interval || elapsed.is_zero() {
            return None;
        }
        self.current = self.frames as f64 / elapsed.as_secs_f64();
        self.frames = 0;
        self.window_start = now;
        Some(self.current)
    }

    pub fn fps(&self) -> f64 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_reports_after_interval() {
        let start = Instant::now();
        let mut counter = FpsCounter::new(start);
        for i in 1..60 {
            assert_eq!(counter.record_frame(start + Duration::from_millis(i * 16)), None);
        }
        let fps = counter.record_frame(start + Duration::from_secs(1)).unwrap();
        assert!((fps - 60.0).abs() < 1e-9);
        assert!((counter.fps() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_fps_resets_window() {
        let start = Instant::now();
        let mut counter = FpsCounter::with_interval(start, Duration::from_millis(500));
        counter.record_frame(start + Duration::from_millis(500));
        assert_eq!(counter.record_frame(start + Duration::from_millis(600)), None);
        let fps = counter.record_frame(start + Duration::from_millis(1000)).unwrap();
        assert!((fps - 4.0).abs() < 1e-9);
    }
}
