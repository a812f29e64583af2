use serde::{Deserialize, Serialize};
use std::fmt;

/// A span of scene time, in seconds. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Duration {
    seconds: f64,
}

impl Duration {
    /// Negative input clamps to zero.
    pub fn from_seconds(s: f64) -> Self {
        Self {
            seconds: s.max(0.0),
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    /// Frames needed to show the whole span at `fps`, rounding up.
    pub fn frame_count(&self, fps: f64) -> u64 {
        (self.seconds * fps).ceil() as u64
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.seconds < 1.0 {
            write!(f, "{:.0}ms", self.seconds * 1000.0)
        } else {
            write!(f, "{:.2}s", self.seconds)
        }
    }
}

/// Where an animation sits on the scene timeline: an offset from the scene
/// start plus how long it runs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeWindow {
    start_offset: f64,
    duration: Duration,
}

impl TimeWindow {
    /// Negative offsets clamp to the scene start.
    pub fn new(start_offset: f64, duration: Duration) -> Self {
        Self {
            start_offset: start_offset.max(0.0),
            duration,
        }
    }

    pub fn start(&self) -> f64 {
        self.start_offset
    }

    pub fn end(&self) -> f64 {
        self.start_offset + self.duration.as_seconds()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Linear progress through the window at scene time `t`, in [0, 1].
    ///
    /// `None` outside the window and for non-finite `t`. A zero-length
    /// window is complete as soon as it is reached.
    pub fn fraction_at(&self, t: f64) -> Option<f64> {
        if !t.is_finite() || t < self.start() || t > self.end() {
            return None;
        }
        let span = self.duration.as_seconds();
        if span > 0.0 {
            Some(((t - self.start()) / span).clamp(0.0, 1.0))
        } else {
            Some(1.0)
        }
    }

    /// Whether the two windows share more than `slack` seconds.
    pub fn overlaps(&self, other: &TimeWindow, slack: f64) -> bool {
        self.start() < other.end() - slack && other.start() < self.end() - slack
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s..{:.3}s", self.start(), self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_clamps_and_counts_frames() {
        assert_eq!(Duration::from_seconds(-1.0), Duration::zero());
        assert_eq!(Duration::from_seconds(1.0).frame_count(30.0), 30);
        assert_eq!(Duration::from_seconds(1.01).frame_count(30.0), 31);
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(format!("{}", Duration::from_seconds(2.5)), "2.50s");
        assert_eq!(format!("{}", Duration::from_seconds(0.5)), "500ms");
    }

    #[test]
    fn test_window_bounds() {
        let w = TimeWindow::new(1.5, Duration::from_seconds(2.0));
        assert_eq!(w.start(), 1.5);
        assert_eq!(w.end(), 3.5);
        assert_eq!(TimeWindow::new(-2.0, Duration::zero()).start(), 0.0);
        assert_eq!(format!("{}", w), "1.500s..3.500s");
    }

    #[test]
    fn test_window_fraction() {
        let w = TimeWindow::new(1.0, Duration::from_seconds(2.0));
        assert_eq!(w.fraction_at(0.5), None);
        assert_eq!(w.fraction_at(1.0), Some(0.0));
        assert_eq!(w.fraction_at(2.0), Some(0.5));
        assert_eq!(w.fraction_at(3.0), Some(1.0));
        assert_eq!(w.fraction_at(3.1), None);
        assert_eq!(w.fraction_at(f64::NAN), None);
        assert_eq!(w.fraction_at(f64::INFINITY), None);

        let instant = TimeWindow::new(1.0, Duration::zero());
        assert_eq!(instant.fraction_at(1.0), Some(1.0));
    }

    #[test]
    fn test_window_overlap() {
        let a = TimeWindow::new(0.0, Duration::from_seconds(1.0));
        let b = TimeWindow::new(0.5, Duration::from_seconds(1.0));
        let c = TimeWindow::new(1.0, Duration::from_seconds(1.0));
        assert!(a.overlaps(&b, 1e-9));
        assert!(b.overlaps(&a, 1e-9));
        // Back to back is not an overlap.
        assert!(!a.overlaps(&c, 1e-9));
    }
}
