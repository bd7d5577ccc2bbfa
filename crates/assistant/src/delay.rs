//! Reply delay sources.
//!
//! The bot waits a short, randomised interval before answering so the
//! conversation reads as typed rather than instantaneous. The delay is a
//! trait seam so the runtime can be driven with a fixed value under test.

use std::time::Duration;

use rand::Rng;

/// Source of the pause inserted between a user message and the bot reply.
pub trait ReplyDelay: Send + Sync {
    fn next_delay(&self) -> Duration;
}

/// Samples uniformly from `[min, max)` on every call.
#[derive(Clone, Copy, Debug)]
pub struct UniformReplyDelay {
    min: Duration,
    max: Duration,
}

impl UniformReplyDelay {
    /// `min` must be strictly below `max`; config validation enforces this
    /// before a runtime is built.
    pub fn new(min: Duration, max: Duration) -> Self {
        debug_assert!(min < max);
        Self { min, max }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }
}

impl Default for UniformReplyDelay {
    fn default() -> Self {
        Self::from_millis(500, 1500)
    }
}

impl ReplyDelay for UniformReplyDelay {
    fn next_delay(&self) -> Duration {
        let span = self.max - self.min;
        let jitter = rand::thread_rng().gen_range(0..span.as_millis() as u64);
        self.min + Duration::from_millis(jitter)
    }
}

/// Always returns the same delay. Test double.
#[derive(Clone, Copy, Debug)]
pub struct FixedReplyDelay(pub Duration);

impl ReplyDelay for FixedReplyDelay {
    fn next_delay(&self) -> Duration {
        self.0
    }
}
