use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Width threshold separating mobile from desktop layout and timing.
pub const DEFAULT_MOBILE_BREAKPOINT_PX: u32 = 768;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    /// Widths at or below the breakpoint count as mobile, matching the
    /// site's `<= 768px` media behavior.
    pub fn classify(width_px: u32, breakpoint_px: u32) -> Self {
        if width_px <= breakpoint_px {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Auto-advance period for this viewport. Mobile readers get the longer
    /// interval.
    pub fn auto_advance_delay(self, mobile_ms: u64, desktop_ms: u64) -> Duration {
        match self {
            Self::Mobile => Duration::from_millis(mobile_ms),
            Self::Desktop => Duration::from_millis(desktop_ms),
        }
    }

    pub fn panel_placement(self) -> PanelPlacement {
        match self {
            Self::Mobile => PanelPlacement::FullWidthBottom,
            Self::Desktop => PanelPlacement::DockedLeft,
        }
    }
}

/// Where the assistant chat panel sits once opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelPlacement {
    /// Mobile: stretched across the viewport just above the bottom edge.
    FullWidthBottom,
    /// Desktop: fixed-width panel anchored to the lower left.
    DockedLeft,
}
