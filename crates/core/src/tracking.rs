//! Fire-and-forget interaction tracking.
//!
//! The storefront only stubs its analytics calls; the sink trait keeps that
//! boundary explicit so the page runtime can emit events without caring
//! whether anything listens.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackCategory {
    Product,
    Recipe,
    Purchase,
    Assistant,
    Carousel,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEvent {
    pub event_id: String,
    pub category: TrackCategory,
    pub action: String,
    pub label: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl TrackEvent {
    pub fn new(category: TrackCategory, action: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            category,
            action: action.into(),
            label: None,
            occurred_at: Utc::now(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

pub trait TrackingSink: Send + Sync {
    fn emit(&self, event: TrackEvent);
}

/// Swallows everything, like the storefront's placeholder tracker.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTrackingSink;

impl TrackingSink for NoopTrackingSink {
    fn emit(&self, _event: TrackEvent) {}
}

#[derive(Clone, Default)]
pub struct InMemoryTrackingSink {
    events: Arc<Mutex<Vec<TrackEvent>>>,
}

impl InMemoryTrackingSink {
    pub fn events(&self) -> Vec<TrackEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TrackingSink for InMemoryTrackingSink {
    fn emit(&self, event: TrackEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryTrackingSink, TrackCategory, TrackEvent, TrackingSink};

    #[test]
    fn in_memory_sink_records_events_in_order() {
        let sink = InMemoryTrackingSink::default();
        sink.emit(TrackEvent::new(TrackCategory::Product, "learn_more").with_label("paste"));
        sink.emit(TrackEvent::new(TrackCategory::Purchase, "platform_click").with_label("Zepto"));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action, "learn_more");
        assert_eq!(events[0].label.as_deref(), Some("paste"));
        assert_eq!(events[1].category, TrackCategory::Purchase);
        assert_ne!(events[0].event_id, events[1].event_id);
    }
}
