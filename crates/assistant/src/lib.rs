//! Nutrition Assistant - scripted conversational responder
//!
//! This crate is the chat widget's brain. It is deliberately not an NLU
//! system: replies come from an ordered keyword rule table evaluated
//! first-match-wins, so every answer is deterministic and auditable.
//!
//! # Architecture
//!
//! 1. **Rule table** (`rules`) - ordered (trigger set, canned reply) pairs
//!    with a guaranteed fallback; `respond` is pure.
//! 2. **Session** (`session`) - chat open/closed flag plus the transcript;
//!    `submit` is the only stateful operation.
//! 3. **Reply scheduling** (`delay`) - injectable delay source simulating
//!    the bot "typing" pause; tests substitute a fixed value.
//! 4. **Runtime** (`runtime`) - async orchestrator that appends the user
//!    message, waits out the scheduled delay, then appends the reply.

pub mod delay;
pub mod rules;
pub mod runtime;
pub mod session;

pub use delay::{FixedReplyDelay, ReplyDelay, UniformReplyDelay};
pub use rules::{respond, ResponseRule, FALLBACK_REPLY, RULES};
pub use runtime::AssistantRuntime;
pub use session::{ChatMessage, ChatSession, PendingReply, Sender, ToggleOutcome};
