//! Chat session state: the open/closed panel flag and the transcript.
//!
//! The session is a plain state machine. Mutating operations return outcome
//! structs describing what the embedding surface should do (focus the input,
//! schedule a reply) instead of performing side effects themselves.

use std::time::Duration;

use nutrisite_core::viewport::{PanelPlacement, ViewportClass};
use serde::Serialize;

use crate::delay::ReplyDelay;
use crate::rules;

/// Greeting pushed when the visitor asks for a live expert.
pub const LIVE_CHAT_GREETING: &str = "Hi! I'm here to help you with any questions about \
    Saffola Nutripower. Ask me about products, nutrition, recipes, or anything else!";

/// Pause before the live-chat greeting appears.
pub const LIVE_CHAT_GREETING_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { sender: Sender::User, text: text.into() }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self { sender: Sender::Bot, text: text.into() }
    }
}

/// What the surface should do after the panel was toggled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub open: bool,
    pub placement: PanelPlacement,
    /// `Some` only when the panel just opened; the surface focuses the text
    /// input after this pause so the open animation finishes first.
    pub focus_input_after: Option<Duration>,
}

/// A reply that has been decided but not yet delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingReply {
    pub reply: &'static str,
    /// Matched rule topic, `None` for the fallback. Feeds tracking.
    pub topic: Option<&'static str>,
    pub delay: Duration,
}

/// Open/closed flag plus the full message history. Toggling the panel never
/// touches the transcript.
#[derive(Debug)]
pub struct ChatSession {
    open: bool,
    transcript: Vec<ChatMessage>,
    focus_delay: Duration,
}

impl ChatSession {
    pub fn new(focus_delay: Duration) -> Self {
        Self { open: false, transcript: Vec::new(), focus_delay }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Flip the panel. The placement depends on the viewport: mobile gets a
    /// full-width bottom sheet, desktop a docked panel.
    pub fn toggle(&mut self, viewport: ViewportClass) -> ToggleOutcome {
        self.open = !self.open;
        ToggleOutcome {
            open: self.open,
            placement: viewport.panel_placement(),
            focus_input_after: self.open.then_some(self.focus_delay),
        }
    }

    /// Open the panel if it is closed (never closes it) and queue the
    /// live-chat greeting. Returns the toggle outcome when the panel state
    /// changed, plus the greeting to deliver after a short pause.
    pub fn open_live_chat(
        &mut self,
        viewport: ViewportClass,
    ) -> (Option<ToggleOutcome>, PendingReply) {
        let outcome = (!self.open).then(|| self.toggle(viewport));
        let greeting = PendingReply {
            reply: LIVE_CHAT_GREETING,
            topic: None,
            delay: LIVE_CHAT_GREETING_DELAY,
        };
        (outcome, greeting)
    }

    /// Record a user message and decide the reply. Whitespace-only input is
    /// ignored entirely: nothing is appended and no reply is scheduled.
    pub fn submit(&mut self, raw: &str, delay: &dyn ReplyDelay) -> Option<PendingReply> {
        let message = raw.trim();
        if message.is_empty() {
            return None;
        }
        self.transcript.push(ChatMessage::user(message));
        Some(PendingReply {
            reply: rules::respond(message),
            topic: rules::matched_topic(message),
            delay: delay.next_delay(),
        })
    }

    /// Append a delivered bot reply to the transcript.
    pub fn record_reply(&mut self, reply: &str) {
        self.transcript.push(ChatMessage::bot(reply));
    }
}
