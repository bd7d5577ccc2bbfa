//! The page event loop.
//!
//! One task owns all interactive state (carousel, modal, chat session,
//! viewport class) and consumes [`PageEvent`]s from a single channel.
//! Timed behaviors (auto-advance, resize debounce, scheduled replies) run
//! as helper tasks that feed events back into the same channel, so the
//! loop itself never sleeps and ordering stays total.

use std::sync::Arc;
use std::time::Duration;

use nutrisite_assistant::delay::{ReplyDelay, UniformReplyDelay};
use nutrisite_assistant::session::{ChatSession, ToggleOutcome};
use nutrisite_core::availability::check_availability;
use nutrisite_core::carousel::{Carousel, SwipeGesture, TimerDirective};
use nutrisite_core::catalog::{ModalEvent, ModalState};
use nutrisite_core::config::SiteConfig;
use nutrisite_core::errors::RuntimeError;
use nutrisite_core::links::DEFAULT_SEARCH_QUERY;
use nutrisite_core::recommend::recommend;
use nutrisite_core::tracking::{TrackCategory, TrackEvent, TrackingSink};
use nutrisite_core::viewport::ViewportClass;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, warn};

use crate::events::{Key, PageEvent};
use crate::surface::PageSurface;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Emits tracked interactions as structured log events. Stands in for the
/// storefront's analytics placeholder.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingTrackingSink;

impl TrackingSink for TracingTrackingSink {
    fn emit(&self, event: TrackEvent) {
        debug!(
            event_name = "page.interaction.tracked",
            event_id = %event.event_id,
            category = ?event.category,
            action = %event.action,
            label = event.label.as_deref().unwrap_or(""),
            "interaction tracked"
        );
    }
}

/// Repeating auto-advance timer. Starting is replace-on-start, stopping is
/// idempotent; ticks are delivered as [`PageEvent::AutoAdvanceTick`].
pub struct AutoAdvanceTimer {
    handle: Option<JoinHandle<()>>,
    events: mpsc::Sender<PageEvent>,
}

impl AutoAdvanceTimer {
    pub fn new(events: mpsc::Sender<PageEvent>) -> Self {
        Self { handle: None, events }
    }

    pub fn start(&mut self, period: Duration) {
        self.stop();
        let events = self.events.clone();
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(time::Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if events.send(PageEvent::AutoAdvanceTick).await.is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for AutoAdvanceTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

pub struct PageRuntime {
    config: SiteConfig,
    surface: Arc<dyn PageSurface>,
    tracking: Arc<dyn TrackingSink>,
    reply_delay: Arc<dyn ReplyDelay>,
    events_tx: mpsc::Sender<PageEvent>,
    events_rx: mpsc::Receiver<PageEvent>,
    carousel: Carousel,
    modal: ModalState,
    session: ChatSession,
    viewport: ViewportClass,
    timer: AutoAdvanceTimer,
    touch_start_x: Option<f32>,
    resize_generation: u64,
    rng: StdRng,
}

impl PageRuntime {
    pub fn new(
        config: SiteConfig,
        surface: Arc<dyn PageSurface>,
        tracking: Arc<dyn TrackingSink>,
        initial_width_px: u32,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let viewport =
            ViewportClass::classify(initial_width_px, config.viewport.mobile_breakpoint_px);
        let reply_delay = Arc::new(UniformReplyDelay::from_millis(
            config.assistant.reply_delay_min_ms,
            config.assistant.reply_delay_max_ms,
        ));
        Self {
            carousel: Carousel::new(config.carousel.slide_count),
            session: ChatSession::new(Duration::from_millis(config.assistant.focus_delay_ms)),
            timer: AutoAdvanceTimer::new(events_tx.clone()),
            modal: ModalState::Closed,
            viewport,
            reply_delay,
            touch_start_x: None,
            resize_generation: 0,
            rng: StdRng::from_entropy(),
            config,
            surface,
            tracking,
            events_tx,
            events_rx,
        }
    }

    /// Substitute the reply delay source, e.g. a fixed one under test.
    pub fn with_reply_delay(mut self, reply_delay: Arc<dyn ReplyDelay>) -> Self {
        self.reply_delay = reply_delay;
        self
    }

    pub fn sender(&self) -> mpsc::Sender<PageEvent> {
        self.events_tx.clone()
    }

    pub fn current_slide(&self) -> usize {
        self.carousel.current()
    }

    pub fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn is_chat_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn transcript(&self) -> &[nutrisite_assistant::session::ChatMessage] {
        self.session.transcript()
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    fn auto_delay(&self) -> TimerDirective {
        Carousel::restart_directive(
            self.viewport,
            self.config.carousel.mobile_delay_ms,
            self.config.carousel.desktop_delay_ms,
        )
    }

    fn apply_timer_directive(&mut self, directive: TimerDirective) {
        match directive {
            TimerDirective::Restart(period) => self.timer.start(period),
            TimerDirective::Stop => self.timer.stop(),
            TimerDirective::Leave => {}
        }
    }

    /// Render the initial frame and begin auto-advancing.
    pub async fn start(&mut self) -> Result<(), RuntimeError> {
        info!(
            event_name = "page.runtime.started",
            viewport = ?self.viewport,
            slide_count = self.carousel.slide_count(),
            "page runtime started"
        );
        let frame = self.carousel.frame();
        self.surface.apply_carousel(&frame).await?;
        let directive = self.auto_delay();
        self.apply_timer_directive(directive);
        Ok(())
    }

    /// Consume events until the channel closes or a shutdown arrives. A
    /// surface failure is logged and the loop keeps going.
    pub async fn run(&mut self) {
        while let Some(event) = self.events_rx.recv().await {
            if matches!(event, PageEvent::Shutdown) {
                break;
            }
            if let Err(error) = self.handle_event(event).await {
                warn!(
                    event_name = "page.runtime.surface_failure",
                    error = %error,
                    "surface call failed; continuing event loop"
                );
            }
        }
        self.timer.stop();
        info!(event_name = "page.runtime.stopped", "page runtime stopped");
    }

    /// Receive the next queued event without handling it. Lets callers
    /// interleave their own assertions between delivery and effect.
    pub async fn next_event(&mut self) -> Option<PageEvent> {
        self.events_rx.recv().await
    }

    pub async fn handle_event(&mut self, event: PageEvent) -> Result<(), RuntimeError> {
        match event {
            PageEvent::DotPressed(index) => {
                let frame = self.carousel.go_to(index);
                debug!(event_name = "page.carousel.navigated", slide = frame.active_slide);
                self.surface.apply_carousel(&frame).await?;
                // Manual navigation must not undo a hover or touch pause.
                if self.timer.is_running() {
                    let directive = self.auto_delay();
                    self.apply_timer_directive(directive);
                }
            }
            PageEvent::AutoAdvanceTick => {
                // A tick already queued when the timer stopped must not move
                // the carousel.
                if !self.timer.is_running() {
                    return Ok(());
                }
                let frame = self.carousel.advance();
                debug!(event_name = "page.carousel.auto_advanced", slide = frame.active_slide);
                self.surface.apply_carousel(&frame).await?;
            }
            PageEvent::TouchStarted { x } => {
                self.touch_start_x = Some(x);
                self.apply_timer_directive(TimerDirective::Stop);
            }
            PageEvent::TouchEnded { x } => {
                if let Some(start_x) = self.touch_start_x.take() {
                    let gesture = SwipeGesture { start_x, end_x: x };
                    let frame = self
                        .carousel
                        .handle_swipe(gesture, self.config.carousel.swipe_threshold_px);
                    self.surface.apply_carousel(&frame).await?;
                }
                let directive = self.auto_delay();
                self.apply_timer_directive(directive);
            }
            PageEvent::PointerEnteredCarousel => {
                self.apply_timer_directive(TimerDirective::Stop);
            }
            PageEvent::PointerLeftCarousel => {
                let directive = self.auto_delay();
                self.apply_timer_directive(directive);
            }
            PageEvent::KeyPressed(key) => self.handle_key(key).await?,
            PageEvent::Resized { width } => {
                self.resize_generation += 1;
                let generation = self.resize_generation;
                let debounce = Duration::from_millis(self.config.carousel.resize_debounce_ms);
                let events = self.events_tx.clone();
                tokio::spawn(async move {
                    time::sleep(debounce).await;
                    let _ = events.send(PageEvent::ResizeSettled { width, generation }).await;
                });
            }
            PageEvent::ResizeSettled { width, generation } => {
                if generation == self.resize_generation {
                    self.reflow(width).await?;
                }
            }
            PageEvent::OrientationChanged { width } => {
                self.resize_generation += 1;
                self.reflow(width).await?;
            }
            PageEvent::AssistantToggled => {
                let outcome = self.session.toggle(self.viewport);
                self.present_chat_panel(outcome).await?;
            }
            PageEvent::ChatSubmitted(text) => self.handle_chat_submission(&text).await?,
            PageEvent::ReplyReady(reply) => {
                self.session.record_reply(reply);
                if let Some(message) = self.session.transcript().last() {
                    self.surface.render_message(message).await?;
                }
            }
            PageEvent::LiveChatOpened => {
                let (toggle, greeting) = self.session.open_live_chat(self.viewport);
                if let Some(outcome) = toggle {
                    self.present_chat_panel(outcome).await?;
                }
                self.schedule_reply(greeting.reply, greeting.delay);
            }
            PageEvent::LearnMorePressed(variant) => {
                let outcome = self.modal.apply(ModalEvent::LearnMore(variant));
                self.modal = outcome.state;
                info!(event_name = "page.modal.opened", variant = variant.slug());
                self.surface.show_modal(&variant.details()).await?;
                self.surface.set_scroll_lock(outcome.scroll_locked).await?;
                self.tracking.emit(
                    TrackEvent::new(TrackCategory::Product, "learn_more")
                        .with_label(variant.slug()),
                );
            }
            PageEvent::ModalClosePressed => self.dismiss_modal(ModalEvent::ClosePressed).await?,
            PageEvent::ModalBackdropPressed => {
                self.dismiss_modal(ModalEvent::BackdropPressed).await?;
            }
            PageEvent::ModalContentPressed => {
                // Bubbled click inside the dialog; explicitly ignored.
                let outcome = self.modal.apply(ModalEvent::ContentPressed);
                self.modal = outcome.state;
            }
            PageEvent::RecommendationRequested { age, activity } => {
                let recommendation = recommend(age, activity);
                self.surface.show_recommendation(&recommendation).await?;
            }
            PageEvent::RecipeViewed(title) => {
                self.tracking
                    .emit(TrackEvent::new(TrackCategory::Recipe, "recipe_view").with_label(title));
            }
            PageEvent::PincodeChecked(pincode) => {
                let outcome = check_availability(&pincode, &mut self.rng);
                self.surface.show_availability(&outcome).await?;
            }
            PageEvent::PlatformLinkPressed(platform) => {
                let url = platform.search_url(DEFAULT_SEARCH_QUERY);
                info!(
                    event_name = "page.purchase.platform_opened",
                    platform = platform.display_name()
                );
                self.surface.open_external(&url).await?;
                self.tracking.emit(
                    TrackEvent::new(TrackCategory::Purchase, "platform_click")
                        .with_label(platform.display_name()),
                );
            }
            PageEvent::Shutdown => {}
        }
        Ok(())
    }

    async fn handle_key(&mut self, key: Key) -> Result<(), RuntimeError> {
        match key {
            Key::ArrowLeft | Key::ArrowRight => {
                if !self.surface.carousel_visible().await? {
                    return Ok(());
                }
                let frame = match key {
                    Key::ArrowRight => self.carousel.advance(),
                    _ => self.carousel.retreat(),
                };
                self.surface.apply_carousel(&frame).await?;
                if self.timer.is_running() {
                    let directive = self.auto_delay();
                    self.apply_timer_directive(directive);
                }
            }
            Key::Escape => {
                // The chat panel wins when both it and the modal are open;
                // the modal takes the next press.
                if self.session.is_open() {
                    let outcome = self.session.toggle(self.viewport);
                    self.present_chat_panel(outcome).await?;
                } else if self.modal.is_open() {
                    self.dismiss_modal(ModalEvent::EscapePressed).await?;
                }
            }
        }
        Ok(())
    }

    async fn handle_chat_submission(&mut self, text: &str) -> Result<(), RuntimeError> {
        let Some(pending) = self.session.submit(text, self.reply_delay.as_ref()) else {
            return Ok(());
        };
        if let Some(message) = self.session.transcript().last() {
            self.surface.render_message(message).await?;
        }
        debug!(
            event_name = "page.assistant.reply_scheduled",
            topic = pending.topic.unwrap_or("fallback"),
            delay_ms = pending.delay.as_millis() as u64,
        );
        self.tracking.emit(
            TrackEvent::new(TrackCategory::Assistant, "chat_message")
                .with_label(pending.topic.unwrap_or("fallback")),
        );
        self.schedule_reply(pending.reply, pending.delay);
        Ok(())
    }

    fn schedule_reply(&self, reply: &'static str, delay: Duration) {
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = events.send(PageEvent::ReplyReady(reply)).await;
        });
    }

    async fn present_chat_panel(&self, outcome: ToggleOutcome) -> Result<(), RuntimeError> {
        self.surface.set_chat_panel(&outcome).await?;
        if let Some(focus_after) = outcome.focus_input_after {
            let surface = Arc::clone(&self.surface);
            tokio::spawn(async move {
                time::sleep(focus_after).await;
                if let Err(error) = surface.focus_chat_input().await {
                    warn!(error = %error, "deferred chat input focus failed");
                }
            });
        }
        Ok(())
    }

    async fn dismiss_modal(&mut self, event: ModalEvent) -> Result<(), RuntimeError> {
        let outcome = self.modal.apply(event);
        self.modal = outcome.state;
        if outcome.changed {
            debug!(event_name = "page.modal.closed");
            self.surface.close_modal().await?;
            self.surface.set_scroll_lock(outcome.scroll_locked).await?;
        }
        Ok(())
    }

    /// Apply a settled width: always re-render the current frame, and on a
    /// viewport class change re-place the chat panel and restart a running
    /// timer with the new period.
    async fn reflow(&mut self, width: u32) -> Result<(), RuntimeError> {
        let frame = self.carousel.frame();
        self.surface.apply_carousel(&frame).await?;

        let class = ViewportClass::classify(width, self.config.viewport.mobile_breakpoint_px);
        if class == self.viewport {
            return Ok(());
        }
        info!(event_name = "page.viewport.changed", from = ?self.viewport, to = ?class, width);
        self.viewport = class;

        if self.session.is_open() {
            let outcome = ToggleOutcome {
                open: true,
                placement: class.panel_placement(),
                focus_input_after: None,
            };
            self.surface.set_chat_panel(&outcome).await?;
        }
        if self.timer.is_running() {
            let directive = self.auto_delay();
            self.apply_timer_directive(directive);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use nutrisite_assistant::delay::FixedReplyDelay;
    use nutrisite_assistant::session::{Sender, LIVE_CHAT_GREETING};
    use nutrisite_core::availability::AvailabilityOutcome;
    use nutrisite_core::catalog::{ModalState, ProductVariant};
    use nutrisite_core::config::SiteConfig;
    use nutrisite_core::links::DeliveryPlatform;
    use nutrisite_core::tracking::{InMemoryTrackingSink, TrackCategory};
    use nutrisite_core::viewport::ViewportClass;

    use crate::events::{Key, PageEvent};
    use crate::surface::{RecordingSurface, SurfaceCall};

    use super::PageRuntime;

    const DESKTOP_WIDTH: u32 = 1280;
    const REPLY_DELAY: Duration = Duration::from_millis(600);

    fn runtime_with(width: u32) -> (PageRuntime, Arc<RecordingSurface>, InMemoryTrackingSink) {
        let surface = Arc::new(RecordingSurface::new());
        let tracking = InMemoryTrackingSink::default();
        let runtime = PageRuntime::new(
            SiteConfig::default(),
            surface.clone(),
            Arc::new(tracking.clone()),
            width,
        )
        .with_reply_delay(Arc::new(FixedReplyDelay(REPLY_DELAY)));
        (runtime, surface, tracking)
    }

    fn desktop_period(config: &SiteConfig) -> Duration {
        Duration::from_millis(config.carousel.desktop_delay_ms)
    }

    #[tokio::test(start_paused = true)]
    async fn auto_advance_rotates_through_slides() {
        let (mut runtime, surface, _) = runtime_with(DESKTOP_WIDTH);
        let period = desktop_period(&SiteConfig::default());
        runtime.start().await.unwrap();

        for expected in [1_usize, 2, 0] {
            tokio::time::advance(period).await;
            let event = runtime.next_event().await.unwrap();
            assert_eq!(event, PageEvent::AutoAdvanceTick);
            runtime.handle_event(event).await.unwrap();
            assert_eq!(runtime.current_slide(), expected);
        }

        let frames: Vec<usize> = surface
            .calls()
            .await
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::ApplyCarousel(frame) => Some(frame.active_slide),
                _ => None,
            })
            .collect();
        assert_eq!(frames, vec![0, 1, 2, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_timer_never_ticks() {
        let (mut runtime, _, _) = runtime_with(DESKTOP_WIDTH);
        let period = desktop_period(&SiteConfig::default());
        runtime.start().await.unwrap();
        runtime.handle_event(PageEvent::PointerEnteredCarousel).await.unwrap();
        assert!(!runtime.timer_running());

        tokio::time::advance(period * 10).await;
        let next = tokio::time::timeout(Duration::from_millis(1), runtime.next_event()).await;
        assert!(next.is_err(), "no tick may arrive after the timer stopped");
        assert_eq!(runtime.current_slide(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn swipe_pauses_then_resumes_the_timer() {
        let (mut runtime, _, _) = runtime_with(DESKTOP_WIDTH);
        runtime.start().await.unwrap();

        runtime.handle_event(PageEvent::TouchStarted { x: 200.0 }).await.unwrap();
        assert!(!runtime.timer_running());

        runtime.handle_event(PageEvent::TouchEnded { x: 80.0 }).await.unwrap();
        assert_eq!(runtime.current_slide(), 1);
        assert!(runtime.timer_running());
    }

    #[tokio::test(start_paused = true)]
    async fn manual_navigation_keeps_a_hover_pause_in_place() {
        let (mut runtime, _, _) = runtime_with(DESKTOP_WIDTH);
        let period = desktop_period(&SiteConfig::default());
        runtime.start().await.unwrap();
        runtime.handle_event(PageEvent::PointerEnteredCarousel).await.unwrap();
        assert!(!runtime.timer_running());

        runtime.handle_event(PageEvent::DotPressed(2)).await.unwrap();
        assert_eq!(runtime.current_slide(), 2);
        assert!(!runtime.timer_running(), "dot press must not resume a paused timer");

        runtime.handle_event(PageEvent::KeyPressed(Key::ArrowRight)).await.unwrap();
        assert_eq!(runtime.current_slide(), 0);
        assert!(!runtime.timer_running(), "arrow key must not resume a paused timer");

        tokio::time::advance(period * 3).await;
        let next = tokio::time::timeout(Duration::from_millis(1), runtime.next_event()).await;
        assert!(next.is_err(), "no tick may arrive while the pointer stays over the carousel");

        runtime.handle_event(PageEvent::PointerLeftCarousel).await.unwrap();
        assert!(runtime.timer_running());
    }

    #[tokio::test(start_paused = true)]
    async fn short_swipe_leaves_the_slide_alone() {
        let (mut runtime, _, _) = runtime_with(DESKTOP_WIDTH);
        runtime.start().await.unwrap();
        runtime.handle_event(PageEvent::TouchStarted { x: 200.0 }).await.unwrap();
        runtime.handle_event(PageEvent::TouchEnded { x: 180.0 }).await.unwrap();
        assert_eq!(runtime.current_slide(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn arrow_keys_only_apply_while_the_carousel_is_visible() {
        let (mut runtime, surface, _) = runtime_with(DESKTOP_WIDTH);
        runtime.start().await.unwrap();

        surface.set_carousel_visible(false);
        runtime.handle_event(PageEvent::KeyPressed(Key::ArrowRight)).await.unwrap();
        assert_eq!(runtime.current_slide(), 0);

        surface.set_carousel_visible(true);
        runtime.handle_event(PageEvent::KeyPressed(Key::ArrowRight)).await.unwrap();
        assert_eq!(runtime.current_slide(), 1);
        runtime.handle_event(PageEvent::KeyPressed(Key::ArrowLeft)).await.unwrap();
        assert_eq!(runtime.current_slide(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn escape_closes_the_chat_before_the_modal() {
        let (mut runtime, surface, _) = runtime_with(DESKTOP_WIDTH);
        runtime.handle_event(PageEvent::LearnMorePressed(ProductVariant::Paste)).await.unwrap();
        runtime.handle_event(PageEvent::AssistantToggled).await.unwrap();
        assert!(runtime.is_chat_open());
        assert!(runtime.modal().is_open());

        runtime.handle_event(PageEvent::KeyPressed(Key::Escape)).await.unwrap();
        assert!(!runtime.is_chat_open());
        assert!(runtime.modal().is_open(), "first escape only closes the chat");

        runtime.handle_event(PageEvent::KeyPressed(Key::Escape)).await.unwrap();
        assert_eq!(runtime.modal(), ModalState::Closed);

        let calls = surface.calls().await;
        assert!(calls.contains(&SurfaceCall::CloseModal));
        assert!(calls.contains(&SurfaceCall::SetScrollLock(false)));
    }

    #[tokio::test(start_paused = true)]
    async fn chat_reply_is_delivered_without_blocking_the_loop() {
        let (mut runtime, surface, tracking) = runtime_with(DESKTOP_WIDTH);
        runtime.handle_event(PageEvent::AssistantToggled).await.unwrap();
        runtime
            .handle_event(PageEvent::ChatSubmitted("how much protein?".to_owned()))
            .await
            .unwrap();

        // The user message renders immediately; the reply is still pending.
        assert_eq!(runtime.transcript().len(), 1);
        assert_eq!(runtime.transcript()[0].sender, Sender::User);

        tokio::time::advance(REPLY_DELAY).await;
        let event = runtime.next_event().await.unwrap();
        assert!(matches!(event, PageEvent::ReplyReady(_)));
        runtime.handle_event(event).await.unwrap();

        assert_eq!(runtime.transcript().len(), 2);
        assert_eq!(runtime.transcript()[1].sender, Sender::Bot);
        assert!(runtime.transcript()[1].text.contains("12g"));

        let rendered = surface
            .calls()
            .await
            .iter()
            .filter(|call| matches!(call, SurfaceCall::RenderMessage(_)))
            .count();
        assert_eq!(rendered, 2);

        let tracked = tracking.events();
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0].label.as_deref(), Some("protein"));
    }

    #[tokio::test(start_paused = true)]
    async fn toggling_the_panel_twice_preserves_the_transcript() {
        let (mut runtime, _, _) = runtime_with(DESKTOP_WIDTH);
        runtime.handle_event(PageEvent::AssistantToggled).await.unwrap();
        runtime.handle_event(PageEvent::ChatSubmitted("hello".to_owned())).await.unwrap();
        tokio::time::advance(REPLY_DELAY).await;
        let event = runtime.next_event().await.unwrap();
        runtime.handle_event(event).await.unwrap();
        let before = runtime.transcript().to_vec();
        assert_eq!(before.len(), 2);

        runtime.handle_event(PageEvent::AssistantToggled).await.unwrap();
        runtime.handle_event(PageEvent::AssistantToggled).await.unwrap();
        assert!(runtime.is_chat_open());
        assert_eq!(runtime.transcript(), before.as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn resize_bursts_collapse_to_the_last_width() {
        let (mut runtime, surface, _) = runtime_with(DESKTOP_WIDTH);
        runtime.start().await.unwrap();
        assert_eq!(runtime.viewport(), ViewportClass::Desktop);

        runtime.handle_event(PageEvent::Resized { width: 900 }).await.unwrap();
        runtime.handle_event(PageEvent::Resized { width: 500 }).await.unwrap();

        let debounce = Duration::from_millis(SiteConfig::default().carousel.resize_debounce_ms);
        tokio::time::advance(debounce).await;

        // Both settle events arrive; only the newest generation applies.
        let first = runtime.next_event().await.unwrap();
        runtime.handle_event(first).await.unwrap();
        assert_eq!(runtime.viewport(), ViewportClass::Desktop);
        let second = runtime.next_event().await.unwrap();
        runtime.handle_event(second).await.unwrap();
        assert_eq!(runtime.viewport(), ViewportClass::Mobile);
        assert!(runtime.timer_running());

        let reflows = surface
            .calls()
            .await
            .iter()
            .filter(|call| matches!(call, SurfaceCall::ApplyCarousel(_)))
            .count();
        // Initial frame plus the one non-stale settle.
        assert_eq!(reflows, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn orientation_change_reflows_immediately() {
        let (mut runtime, _, _) = runtime_with(500);
        runtime.start().await.unwrap();
        assert_eq!(runtime.viewport(), ViewportClass::Mobile);

        runtime.handle_event(PageEvent::OrientationChanged { width: 1024 }).await.unwrap();
        assert_eq!(runtime.viewport(), ViewportClass::Desktop);
    }

    #[tokio::test(start_paused = true)]
    async fn live_chat_opens_the_panel_and_delivers_the_greeting() {
        let (mut runtime, _, _) = runtime_with(DESKTOP_WIDTH);
        runtime.handle_event(PageEvent::LiveChatOpened).await.unwrap();
        assert!(runtime.is_chat_open());

        tokio::time::advance(Duration::from_millis(500)).await;
        let event = runtime.next_event().await.unwrap();
        runtime.handle_event(event).await.unwrap();
        assert_eq!(runtime.transcript().len(), 1);
        assert_eq!(runtime.transcript()[0].text, LIVE_CHAT_GREETING);
    }

    #[tokio::test(start_paused = true)]
    async fn lookup_panels_render_through_the_surface() {
        let (mut runtime, surface, tracking) = runtime_with(DESKTOP_WIDTH);
        runtime.handle_event(PageEvent::PincodeChecked("12345".to_owned())).await.unwrap();
        runtime
            .handle_event(PageEvent::RecommendationRequested { age: Some(30), activity: None })
            .await
            .unwrap();
        runtime.handle_event(PageEvent::PlatformLinkPressed(DeliveryPlatform::Zepto)).await.unwrap();
        runtime
            .handle_event(PageEvent::RecipeViewed("Energy Ladoos".to_owned()))
            .await
            .unwrap();

        let calls = surface.calls().await;
        assert!(matches!(
            calls[0],
            SurfaceCall::ShowAvailability(AvailabilityOutcome::InvalidPincode { .. })
        ));
        assert!(matches!(calls[1], SurfaceCall::ShowRecommendation(_)));
        assert_eq!(
            calls[2],
            SurfaceCall::OpenExternal(
                "https://www.zeptonow.com/search?query=saffola+nutripower".to_owned()
            )
        );

        let tracked = tracking.events();
        assert_eq!(tracked.len(), 2);
        assert_eq!(tracked[0].label.as_deref(), Some("Zepto"));
        assert_eq!(tracked[1].category, TrackCategory::Recipe);
        assert_eq!(tracked[1].label.as_deref(), Some("Energy Ladoos"));
    }
}
