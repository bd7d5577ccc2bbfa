//! The page event vocabulary.
//!
//! Every user interaction the runtime reacts to arrives as one of these
//! values on a single channel, in arrival order. A few variants are
//! runtime-internal (timer ticks, settled resizes, scheduled replies) but
//! travel the same channel so ordering stays total.

use nutrisite_core::links::DeliveryPlatform;
use nutrisite_core::recommend::ActivityLevel;
use nutrisite_core::ProductVariant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// Navigation dot pressed; the index may be out of range and wraps.
    DotPressed(usize),
    TouchStarted { x: f32 },
    TouchEnded { x: f32 },
    PointerEnteredCarousel,
    PointerLeftCarousel,
    KeyPressed(Key),
    /// Raw resize notification; debounced before it takes effect.
    Resized { width: u32 },
    /// Internal: a resize burst settled. Stale generations are dropped.
    ResizeSettled { width: u32, generation: u64 },
    /// Orientation flips reflow immediately, without the debounce.
    OrientationChanged { width: u32 },
    /// Internal: the auto-advance timer fired.
    AutoAdvanceTick,
    AssistantToggled,
    ChatSubmitted(String),
    /// Internal: a scheduled bot reply is due for delivery.
    ReplyReady(&'static str),
    LiveChatOpened,
    LearnMorePressed(ProductVariant),
    ModalClosePressed,
    ModalBackdropPressed,
    ModalContentPressed,
    RecommendationRequested { age: Option<u32>, activity: Option<ActivityLevel> },
    /// Recipe card interaction; tracked only, rendering stays on the host.
    RecipeViewed(String),
    PincodeChecked(String),
    PlatformLinkPressed(DeliveryPlatform),
    Shutdown,
}
