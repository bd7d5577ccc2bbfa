//! Page orchestration for the Nutripower storefront.
//!
//! Glue between the pure interaction logic in `nutrisite-core`, the chat
//! session in `nutrisite-assistant`, and whatever actually renders the
//! page. The runtime consumes a single ordered event stream and talks to
//! the host exclusively through the [`surface::PageSurface`] trait, so the
//! whole interactive layer runs headless under test.

pub mod events;
pub mod runtime;
pub mod surface;

pub use events::{Key, PageEvent};
pub use runtime::{AutoAdvanceTimer, PageRuntime, TracingTrackingSink};
pub use surface::{PageSurface, RecordingSurface, SurfaceCall, TracingSurface};
