//! State Module - Viewport-reactive UI state machines
//!
//! Each component owns its state exclusively and registers with the host
//! only through scoped subscriptions:
//!
//! - **Intersection** - is a region in view (hero visibility)
//! - **Overlap** - is the fixed header over a band (services)
//! - **Appearance** - resolve header contrast from the two signals above
//! - **Menu** - mobile overlay open/closed with staggered item cues
//! - **Carousel** - timer-driven horizontal auto-advance with wraparound
//! - **Counter** - one-shot count-up on first view

mod appearance;
mod carousel;
mod counter;
mod intersection;
mod menu;
mod overlap;

pub use appearance::*;
pub use carousel::*;
pub use counter::*;
pub use intersection::*;
pub use menu::*;
pub use overlap::*;
