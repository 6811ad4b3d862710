//! Frame timing

use std::time::Duration;

/// Accumulates frame times and reports the average once per interval
#[derive(Debug)]
pub struct FrameStats {
    interval: Duration,
    elapsed: Duration,
    frames: u32,
}

impl FrameStats {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            frames: 0,
        }
    }

    /// Record one frame; returns the average ms/frame when an interval ends
    pub fn tick(&mut self, frame_time: Duration) -> Option<f64> {
        self.elapsed += frame_time;
        self.frames += 1;
        if self.elapsed < self.interval {
            return None;
        }
        let ms = self.elapsed.as_secs_f64() * 1000.0 / f64::from(self.frames);
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        tracing::debug!("{:.3} ms/frame", ms);
        Some(ms)
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_once_per_interval() {
        let mut stats = FrameStats::default();
        let frame = Duration::from_millis(250);
        assert_eq!(stats.tick(frame), None);
        assert_eq!(stats.tick(frame), None);
        assert_eq!(stats.tick(frame), None);
        assert_eq!(stats.tick(frame), Some(250.0));
        assert_eq!(stats.tick(frame), None);
    }
}
