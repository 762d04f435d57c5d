//! Scroll-direction tracking for the on-screen back affordance.
//!
//! Each sample is compared with the previous one. The affordance is visible
//! while the page moves down and is not at the very top; any upward move
//! hides it again. There is no hysteresis.

/// Result of observing one scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    /// Vertical offset in pixels from the top of the page.
    pub offset_y: f64,
    /// `true` when this offset is greater than the previous one.
    pub descending: bool,
}

impl ScrollSample {
    pub fn affordance_visible(&self) -> bool {
        self.descending && self.offset_y > 0.0
    }
}

/// Last observed scroll state. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct ScrollTracker {
    previous: f64,
    descending: bool,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new offset. Non-finite offsets are ignored.
    pub fn observe(&mut self, offset_y: f64) -> ScrollSample {
        if !offset_y.is_finite() {
            log::debug!("Ignoring non-finite scroll offset {offset_y}");
            return self.sample();
        }
        self.descending = offset_y > self.previous;
        self.previous = offset_y;
        self.sample()
    }

    pub fn sample(&self) -> ScrollSample {
        ScrollSample {
            offset_y: self.previous,
            descending: self.descending,
        }
    }

    pub fn affordance_visible(&self) -> bool {
        self.sample().affordance_visible()
    }

    /// Forget all samples (new browser surface).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
