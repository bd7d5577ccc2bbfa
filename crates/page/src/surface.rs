//! The rendering seam.
//!
//! `PageSurface` is everything the runtime asks of the host page: apply a
//! carousel frame, show a modal, append a chat message. The runtime never
//! renders anything itself, which keeps every behavior assertable against
//! the [`RecordingSurface`] double. Methods are fallible because the host
//! can lose the element a call targets; the runtime logs and keeps going.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use nutrisite_assistant::session::ChatMessage;
use nutrisite_assistant::ToggleOutcome;
use nutrisite_core::availability::AvailabilityOutcome;
use nutrisite_core::carousel::CarouselFrame;
use nutrisite_core::catalog::ProductDetails;
use nutrisite_core::errors::RuntimeError;
use nutrisite_core::recommend::Recommendation;
use tokio::sync::Mutex;
use tracing::info;
use url::Url;

#[async_trait]
pub trait PageSurface: Send + Sync {
    async fn apply_carousel(&self, frame: &CarouselFrame) -> Result<(), RuntimeError>;
    async fn render_message(&self, message: &ChatMessage) -> Result<(), RuntimeError>;
    async fn set_chat_panel(&self, outcome: &ToggleOutcome) -> Result<(), RuntimeError>;
    async fn focus_chat_input(&self) -> Result<(), RuntimeError>;
    async fn show_modal(&self, details: &ProductDetails) -> Result<(), RuntimeError>;
    async fn close_modal(&self) -> Result<(), RuntimeError>;
    async fn set_scroll_lock(&self, locked: bool) -> Result<(), RuntimeError>;
    async fn show_recommendation(
        &self,
        recommendation: &Recommendation,
    ) -> Result<(), RuntimeError>;
    async fn show_availability(&self, outcome: &AvailabilityOutcome) -> Result<(), RuntimeError>;
    async fn open_external(&self, url: &Url) -> Result<(), RuntimeError>;
    /// Whether the hero carousel is scrolled into view. Arrow-key
    /// navigation only applies while it is.
    async fn carousel_visible(&self) -> Result<bool, RuntimeError>;
}

/// Headless surface that narrates every render call as a structured log
/// event. Used by the CLI demo runner.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSurface;

#[async_trait]
impl PageSurface for TracingSurface {
    async fn apply_carousel(&self, frame: &CarouselFrame) -> Result<(), RuntimeError> {
        info!(
            event_name = "surface.carousel.applied",
            active_slide = frame.active_slide,
            track_offset_pct = frame.track_offset_pct,
            "carousel frame applied"
        );
        Ok(())
    }

    async fn render_message(&self, message: &ChatMessage) -> Result<(), RuntimeError> {
        info!(
            event_name = "surface.chat.message_rendered",
            sender = ?message.sender,
            text = %message.text,
            "chat message rendered"
        );
        Ok(())
    }

    async fn set_chat_panel(&self, outcome: &ToggleOutcome) -> Result<(), RuntimeError> {
        info!(
            event_name = "surface.chat.panel_set",
            open = outcome.open,
            placement = ?outcome.placement,
            "chat panel placed"
        );
        Ok(())
    }

    async fn focus_chat_input(&self) -> Result<(), RuntimeError> {
        info!(event_name = "surface.chat.input_focused", "chat input focused");
        Ok(())
    }

    async fn show_modal(&self, details: &ProductDetails) -> Result<(), RuntimeError> {
        info!(event_name = "surface.modal.shown", title = details.title, "modal shown");
        Ok(())
    }

    async fn close_modal(&self) -> Result<(), RuntimeError> {
        info!(event_name = "surface.modal.closed", "modal closed");
        Ok(())
    }

    async fn set_scroll_lock(&self, locked: bool) -> Result<(), RuntimeError> {
        info!(event_name = "surface.scroll_lock.set", locked, "scroll lock set");
        Ok(())
    }

    async fn show_recommendation(
        &self,
        recommendation: &Recommendation,
    ) -> Result<(), RuntimeError> {
        info!(
            event_name = "surface.recommendation.shown",
            servings = recommendation.servings,
            coverage_percent = recommendation.coverage_percent,
            ideal_variant = recommendation.ideal_variant.slug(),
            "recommendation shown"
        );
        Ok(())
    }

    async fn show_availability(&self, outcome: &AvailabilityOutcome) -> Result<(), RuntimeError> {
        match outcome {
            AvailabilityOutcome::Available { pincode, platforms } => info!(
                event_name = "surface.availability.shown",
                pincode = %pincode,
                platform_count = platforms.len(),
                "availability shown"
            ),
            AvailabilityOutcome::InvalidPincode { message } => info!(
                event_name = "surface.availability.rejected",
                message = %message,
                "pincode rejected"
            ),
        }
        Ok(())
    }

    async fn open_external(&self, url: &Url) -> Result<(), RuntimeError> {
        info!(event_name = "surface.external.opened", url = %url, "external link opened");
        Ok(())
    }

    async fn carousel_visible(&self) -> Result<bool, RuntimeError> {
        Ok(true)
    }
}

/// One recorded surface invocation.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    ApplyCarousel(CarouselFrame),
    RenderMessage(ChatMessage),
    SetChatPanel(ToggleOutcome),
    FocusChatInput,
    ShowModal(&'static str),
    CloseModal,
    SetScrollLock(bool),
    ShowRecommendation(Recommendation),
    ShowAvailability(AvailabilityOutcome),
    OpenExternal(String),
}

/// Records every call in order. Test double, in the spirit of a scripted
/// transport: assertions read the call log instead of a DOM.
#[derive(Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
    carousel_visible: AtomicBool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self { calls: Mutex::new(Vec::new()), carousel_visible: AtomicBool::new(true) }
    }

    pub fn set_carousel_visible(&self, visible: bool) {
        self.carousel_visible.store(visible, Ordering::SeqCst);
    }

    pub async fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: SurfaceCall) -> Result<(), RuntimeError> {
        self.calls.lock().await.push(call);
        Ok(())
    }
}

#[async_trait]
impl PageSurface for RecordingSurface {
    async fn apply_carousel(&self, frame: &CarouselFrame) -> Result<(), RuntimeError> {
        self.record(SurfaceCall::ApplyCarousel(frame.clone())).await
    }

    async fn render_message(&self, message: &ChatMessage) -> Result<(), RuntimeError> {
        self.record(SurfaceCall::RenderMessage(message.clone())).await
    }

    async fn set_chat_panel(&self, outcome: &ToggleOutcome) -> Result<(), RuntimeError> {
        self.record(SurfaceCall::SetChatPanel(*outcome)).await
    }

    async fn focus_chat_input(&self) -> Result<(), RuntimeError> {
        self.record(SurfaceCall::FocusChatInput).await
    }

    async fn show_modal(&self, details: &ProductDetails) -> Result<(), RuntimeError> {
        self.record(SurfaceCall::ShowModal(details.title)).await
    }

    async fn close_modal(&self) -> Result<(), RuntimeError> {
        self.record(SurfaceCall::CloseModal).await
    }

    async fn set_scroll_lock(&self, locked: bool) -> Result<(), RuntimeError> {
        self.record(SurfaceCall::SetScrollLock(locked)).await
    }

    async fn show_recommendation(
        &self,
        recommendation: &Recommendation,
    ) -> Result<(), RuntimeError> {
        self.record(SurfaceCall::ShowRecommendation(recommendation.clone())).await
    }

    async fn show_availability(&self, outcome: &AvailabilityOutcome) -> Result<(), RuntimeError> {
        self.record(SurfaceCall::ShowAvailability(outcome.clone())).await
    }

    async fn open_external(&self, url: &Url) -> Result<(), RuntimeError> {
        self.record(SurfaceCall::OpenExternal(url.to_string())).await
    }

    async fn carousel_visible(&self) -> Result<bool, RuntimeError> {
        Ok(self.carousel_visible.load(Ordering::SeqCst))
    }
}
