//! # spark-landing
//!
//! Reactive viewport-driven UI state for a marketing landing page.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! The page never touches a browser directly. A host delivers intersection
//! notifications, scroll/resize events, timer ticks and animation frames; the
//! state machines turn them into plain signals that rendering reads:
//!
//! ```text
//! host events → intersection / overlap signals → appearance derived → header chrome
//! host timer  → carousel offset
//! host frames → counter value
//! user input  → menu state + item cues
//! ```
//!
//! Every host registration is a scoped [`host::Subscription`], released
//! exactly once when its component is unmounted or dropped.
//!
//! ## Modules
//!
//! - [`types`] - Geometry and intersection types (Rect, RootMargin, ScrollExtent, ...)
//! - [`host`] - Host capability traits, subscriptions, and the simulated host
//! - [`state`] - The six state machines
//! - [`page`] - Mounting everything against one host
//! - [`config`] - TOML configuration with page defaults
//! - [`nav`] - Navigation anchors and reveal timing

pub mod config;
pub mod error;
pub mod host;
pub mod nav;
pub mod page;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{CarouselConfig, CounterConfig, HeaderConfig, LandingConfig, MenuConfig};

pub use error::{ConfigError, HostError};

pub use host::{
    Capabilities, FrameHost, GeometryHost, Host, IntersectionHost, ScrollHost, SimHost,
    Subscription, TimerHost,
};

pub use nav::{
    find_link, reveal_delays, NavLink, OverlayItem, SocialLink, NAV_LINKS, OVERLAY_ITEMS,
    SOCIAL_LINKS,
};

pub use page::{HeaderChrome, LandingPage, PageRegions};

pub use state::{
    // Header
    appearance_derived, header_overlaps, resolve, HeaderTone, LogoVariant,
    OverlapDetector, ViewportIntersectionTracker,
    // Menu
    ItemCue, MenuState, MenuStateMachine, MenuTransition, StaggerDirection, StaggerSchedule,
    // Carousel
    advance, CarouselAutoAdvance,
    // Counter
    counter_value, CounterPhase, ViewportTriggeredCounter,
};
