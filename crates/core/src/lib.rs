pub mod availability;
pub mod carousel;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod links;
pub mod recommend;
pub mod tracking;
pub mod viewport;

pub use availability::{check_availability, AvailabilityOutcome, PLATFORMS};
pub use carousel::{Carousel, CarouselFrame, SwipeGesture, SwipeOutcome, TimerDirective};
pub use catalog::{ModalEvent, ModalOutcome, ModalState, ProductDetails, ProductVariant};
pub use config::{ConfigError, LoadOptions, SiteConfig};
pub use errors::RuntimeError;
pub use links::DeliveryPlatform;
pub use recommend::{recommend, ActivityLevel, AgeBand, DailyNeeds, Recommendation};
pub use tracking::{
    InMemoryTrackingSink, NoopTrackingSink, TrackCategory, TrackEvent, TrackingSink,
};
pub use viewport::{PanelPlacement, ViewportClass};
