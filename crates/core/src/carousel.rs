//! Hero carousel state machine.
//!
//! The carousel owns nothing but its slide index; rendering and timer
//! scheduling are expressed as outcome values (`CarouselFrame`,
//! `TimerDirective`) for the page runtime to act on. Every operation is
//! total: out-of-range indices wrap, sub-threshold swipes are no-ops.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::viewport::ViewportClass;

/// Minimum horizontal travel before a touch sequence counts as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Carousel {
    current: usize,
    slide_count: usize,
}

/// One rendered state of the carousel: exactly one slide and one dot are
/// active, and the track is shifted left by `active_slide * 100%`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarouselFrame {
    pub active_slide: usize,
    pub track_offset_pct: f32,
    pub slide_active: Vec<bool>,
    pub dot_active: Vec<bool>,
}

/// A completed touch gesture on the horizontal axis, in screen coordinates
/// (x grows rightward). Consumed once to produce a direction decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwipeGesture {
    pub start_x: f32,
    pub end_x: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Left drag: the finger moved toward smaller x, advance to next slide.
    Next,
    /// Right drag: back to the previous slide.
    Previous,
    /// Travel below the threshold.
    Ignored,
}

/// What the runtime should do with the auto-advance timer after a
/// transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerDirective {
    /// Cancel any running timer and schedule a fresh one with this period.
    Restart(Duration),
    /// Cancel the timer if present; idempotent.
    Stop,
    /// Leave the timer alone.
    Leave,
}

impl Carousel {
    pub fn new(slide_count: usize) -> Self {
        // A one-slide carousel still renders; it just never moves.
        Self { current: 0, slide_count: slide_count.max(1) }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Move to slide `index`, wrapping modulo the slide count. Always
    /// succeeds; callers may pass any integer.
    pub fn go_to(&mut self, index: usize) -> CarouselFrame {
        self.current = index % self.slide_count;
        self.frame()
    }

    pub fn advance(&mut self) -> CarouselFrame {
        self.go_to(self.current + 1)
    }

    pub fn retreat(&mut self) -> CarouselFrame {
        self.go_to(self.current + self.slide_count - 1)
    }

    /// Classify a completed gesture without mutating state.
    pub fn classify_swipe(gesture: SwipeGesture, threshold_px: f32) -> SwipeOutcome {
        let distance = gesture.end_x - gesture.start_x;
        if distance.abs() <= threshold_px {
            SwipeOutcome::Ignored
        } else if distance > 0.0 {
            SwipeOutcome::Previous
        } else {
            SwipeOutcome::Next
        }
    }

    /// Apply a completed gesture. Sub-threshold travel leaves the current
    /// frame untouched.
    pub fn handle_swipe(&mut self, gesture: SwipeGesture, threshold_px: f32) -> CarouselFrame {
        match Self::classify_swipe(gesture, threshold_px) {
            SwipeOutcome::Next => self.advance(),
            SwipeOutcome::Previous => self.retreat(),
            SwipeOutcome::Ignored => self.frame(),
        }
    }

    /// Re-render the current slide, e.g. after an orientation change.
    pub fn frame(&self) -> CarouselFrame {
        CarouselFrame {
            active_slide: self.current,
            track_offset_pct: -(self.current as f32) * 100.0,
            slide_active: (0..self.slide_count).map(|i| i == self.current).collect(),
            dot_active: (0..self.slide_count).map(|i| i == self.current).collect(),
        }
    }

    /// Timer directive for entering a viewport class (initial start, resume
    /// after hover/touch pause, or settled resize).
    pub fn restart_directive(
        viewport: ViewportClass,
        mobile_delay_ms: u64,
        desktop_delay_ms: u64,
    ) -> TimerDirective {
        TimerDirective::Restart(viewport.auto_advance_delay(mobile_delay_ms, desktop_delay_ms))
    }
}
