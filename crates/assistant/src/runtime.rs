//! Async orchestration of a chat session.
//!
//! The runtime owns the session and a delay source and turns the pure
//! session operations into timed ones: a submitted message produces its
//! reply only after the scheduled pause has elapsed.

use std::time::Duration;

use nutrisite_core::viewport::ViewportClass;
use tokio::time;

use crate::delay::{ReplyDelay, UniformReplyDelay};
use crate::session::{ChatMessage, ChatSession, ToggleOutcome};

pub struct AssistantRuntime {
    session: ChatSession,
    delay: Box<dyn ReplyDelay>,
}

impl AssistantRuntime {
    pub fn new(focus_delay: Duration, delay: Box<dyn ReplyDelay>) -> Self {
        Self { session: ChatSession::new(focus_delay), delay }
    }

    /// Runtime with the stock 300ms focus pause and 500-1500ms reply jitter.
    pub fn with_defaults() -> Self {
        Self::new(Duration::from_millis(300), Box::new(UniformReplyDelay::default()))
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        self.session.transcript()
    }

    pub fn toggle(&mut self, viewport: ViewportClass) -> ToggleOutcome {
        self.session.toggle(viewport)
    }

    /// Submit a message, wait out the typing pause, and deliver the reply.
    /// Returns the reply text, or `None` when the input was empty.
    pub async fn handle_message(&mut self, raw: &str) -> Option<&'static str> {
        let pending = self.session.submit(raw, self.delay.as_ref())?;
        time::sleep(pending.delay).await;
        self.session.record_reply(pending.reply);
        Some(pending.reply)
    }

    /// Open the panel (if needed) and deliver the live-chat greeting after
    /// its fixed pause.
    pub async fn open_live_chat(&mut self, viewport: ViewportClass) -> Option<ToggleOutcome> {
        let (toggle, greeting) = self.session.open_live_chat(viewport);
        time::sleep(greeting.delay).await;
        self.session.record_reply(greeting.reply);
        toggle
    }
}
