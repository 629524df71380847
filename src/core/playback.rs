//! Frame clock for the heatmap animation
//!
//! Advances one frame per interval and wraps at the end, like a repeating
//! `FuncAnimation`. Time is passed in explicitly (seconds) so the clock is
//! independent of the UI toolkit.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Playback {
    frame_count: usize,
    interval: f64,
    current: usize,
    playing: bool,
    /// Time of the last frame change; `None` until the first tick
    last_step: Option<f64>,
}

impl Playback {
    pub fn new(frame_count: usize, interval: Duration) -> Self {
        Self {
            frame_count,
            interval: interval.as_secs_f64(),
            current: 0,
            playing: true,
            last_step: None,
        }
    }

    pub fn frame(&self) -> usize {
        self.current
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.interval)
    }

    /// Advance by every whole interval elapsed since the last step.
    ///
    /// Returns true if the visible frame changed.
    pub fn tick(&mut self, now: f64) -> bool {
        if self.frame_count == 0 || self.interval <= 0.0 {
            return false;
        }
        let Some(last) = self.last_step else {
            self.last_step = Some(now);
            return false;
        };
        if !self.playing {
            self.last_step = Some(now);
            return false;
        }

        // Tolerance absorbs rounding in the accumulated step times
        let steps = ((now - last) / self.interval + 1e-9).floor() as usize;
        if steps == 0 {
            return false;
        }
        self.last_step = Some(last + steps as f64 * self.interval);

        let prev = self.current;
        self.current = (self.current + steps) % self.frame_count;
        self.current != prev
    }

    /// Time until the next frame is due, for scheduling repaints
    pub fn until_next(&self, now: f64) -> Option<Duration> {
        if !self.playing || self.frame_count == 0 {
            return None;
        }
        let due = match self.last_step {
            Some(last) => (last + self.interval - now).max(0.0),
            None => 0.0,
        };
        Some(Duration::from_secs_f64(due))
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn step_forward(&mut self) {
        if self.frame_count > 0 {
            self.current = (self.current + 1) % self.frame_count;
        }
    }

    pub fn step_back(&mut self) {
        if self.frame_count > 0 {
            self.current = (self.current + self.frame_count - 1) % self.frame_count;
        }
    }

    /// Jump to `frame`, clamped to the last frame
    pub fn seek(&mut self, frame: usize) {
        self.current = frame.min(self.frame_count.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(frames: usize) -> Playback {
        Playback::new(frames, Duration::from_millis(100))
    }

    #[test]
    fn test_interval_reported_as_configured() {
        assert_eq!(clock(5).interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_first_tick_only_arms_clock() {
        let mut p = clock(5);
        assert!(!p.tick(10.0));
        assert_eq!(p.frame(), 0);
    }

    #[test]
    fn test_advances_one_frame_per_interval() {
        let mut p = clock(5);
        p.tick(0.0);
        assert!(!p.tick(0.05));
        assert!(p.tick(0.1));
        assert_eq!(p.frame(), 1);
        assert!(p.tick(0.21));
        assert_eq!(p.frame(), 2);
    }

    #[test]
    fn test_catches_up_after_stall() {
        let mut p = clock(10);
        p.tick(0.0);
        assert!(p.tick(0.35));
        assert_eq!(p.frame(), 3);
        // remainder carries over: the next frame is due at 0.4
        assert!(p.tick(0.4));
        assert_eq!(p.frame(), 4);
    }

    #[test]
    fn test_wraps_at_end() {
        let mut p = clock(3);
        p.tick(0.0);
        p.tick(0.3);
        assert_eq!(p.frame(), 0);
        p.tick(0.4);
        assert_eq!(p.frame(), 1);
    }

    #[test]
    fn test_paused_clock_does_not_advance() {
        let mut p = clock(5);
        p.tick(0.0);
        p.toggle();
        assert!(!p.is_playing());
        assert!(!p.tick(1.0));
        assert_eq!(p.frame(), 0);
        assert_eq!(p.until_next(1.0), None);

        // resuming does not replay the paused time
        p.toggle();
        assert!(!p.tick(1.05));
        assert!(p.tick(1.1));
        assert_eq!(p.frame(), 1);
    }

    #[test]
    fn test_manual_stepping_wraps() {
        let mut p = clock(4);
        p.step_back();
        assert_eq!(p.frame(), 3);
        p.step_forward();
        assert_eq!(p.frame(), 0);
        p.seek(99);
        assert_eq!(p.frame(), 3);
    }

    #[test]
    fn test_empty_animation_is_inert() {
        let mut p = clock(0);
        p.tick(0.0);
        assert!(!p.tick(5.0));
        p.step_forward();
        p.step_back();
        p.seek(3);
        assert_eq!(p.frame(), 0);
        assert_eq!(p.until_next(0.0), None);
    }

    #[test]
    fn test_until_next_counts_down() {
        let mut p = clock(5);
        assert_eq!(p.until_next(0.0), Some(Duration::ZERO));
        p.tick(1.0);
        let wait = p.until_next(1.04).unwrap();
        assert!((wait.as_secs_f64() - 0.06).abs() < 1e-9);
        assert_eq!(p.until_next(2.0), Some(Duration::ZERO));
    }
}
