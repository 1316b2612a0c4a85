//! Frame pacing.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

/// Number of recent frames averaged by [`Clock::fps`].
const FPS_WINDOW: usize = 10;

/// A frame-rate limiter.
///
/// Each call to [`Clock::tick`] sleeps until at least one frame interval has
/// passed since the previous tick, then reports the elapsed time.
#[derive(Debug)]
pub struct Clock {
    target_fps: u32,
    last_tick: Instant,
    recent: VecDeque<Duration>,
}

impl Clock {
    /// Create a clock targeting `target_fps` frames per second.
    ///
    /// A target of zero disables the limiter.
    pub fn new(target_fps: u32) -> Self {
        Self {
            target_fps,
            last_tick: Instant::now(),
            recent: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    /// Minimum time between two ticks.
    pub fn frame_interval(&self) -> Duration {
        if self.target_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(1000 / self.target_fps as u64)
        }
    }

    /// Wait for the next frame boundary and return the elapsed milliseconds
    /// since the previous tick.
    ///
    /// Returns immediately when the loop is already behind schedule.
    pub fn tick(&mut self) -> u64 {
        let interval = self.frame_interval();
        let spent = self.last_tick.elapsed();
        if spent < interval {
            thread::sleep(interval - spent);
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        if self.recent.len() == FPS_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(elapsed);

        elapsed.as_millis() as u64
    }

    /// Average frames per second over the last few ticks.
    pub fn fps(&self) -> f64 {
        let total: Duration = self.recent.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.recent.len() as f64 / total.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval() {
        assert_eq!(Clock::new(60).frame_interval(), Duration::from_millis(16));
        assert_eq!(Clock::new(0).frame_interval(), Duration::ZERO);
    }

    #[test]
    fn test_tick_respects_interval() {
        let mut clock = Clock::new(100);
        clock.tick();
        for _ in 0..3 {
            assert!(clock.tick() >= 10);
        }
    }

    #[test]
    fn test_fps_estimate() {
        let mut clock = Clock::new(50);
        assert_eq!(clock.fps(), 0.0);
        for _ in 0..3 {
            clock.tick();
        }
        let fps = clock.fps();
        assert!(fps > 0.0 && fps <= 51.0, "fps was {fps}");
    }
}
