//! Host Module - Capabilities the page borrows from its environment
//!
//! The state machines never talk to a real browser or window system. They
//! register interest through these traits and are called back as discrete,
//! non-overlapping turns:
//!
//! - **Intersection** - region visibility notifications
//! - **Scroll** - window scroll/resize notifications, programmatic scrolling
//! - **Geometry** - bounding boxes and scroll extents
//! - **Animation frames** - one-shot frame callbacks with a monotonic timestamp
//! - **Timers** - repeating intervals
//!
//! Every registration is wrapped in a [`Subscription`] that releases it
//! exactly once, on `release()` or on drop.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use spark_landing::host::{self, SimHost};
//!
//! let host = Rc::new(SimHost::new(1280.0, 720.0));
//! let sub = host::listen(&host, ViewportEvent::Scroll, || println!("scrolled"))?;
//!
//! // Later, on teardown:
//! sub.release();
//! ```

mod sim;

pub use sim::SimHost;

use std::rc::Rc;
use std::time::Duration;

use crate::error::HostError;
use crate::types::{IntersectionOptions, Rect, RegionId, ScrollBehavior, ScrollExtent, ViewportEvent};

// =============================================================================
// CAPABILITIES
// =============================================================================

bitflags::bitflags! {
    /// Host primitives a page can rely on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const INTERSECTION = 1 << 0;
        const SCROLL = 1 << 1;
        const GEOMETRY = 1 << 2;
        const ANIMATION_FRAME = 1 << 3;
        const TIMER = 1 << 4;
    }
}

// =============================================================================
// HANDLES AND CALLBACKS
// =============================================================================

macro_rules! handle_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u64);
    };
}

handle_type!(
    /// Returned by [`IntersectionHost::observe`].
    ObserverHandle
);
handle_type!(
    /// Returned by [`ScrollHost::add_listener`].
    ListenerHandle
);
handle_type!(
    /// Returned by [`FrameHost::request_frame`].
    FrameHandle
);
handle_type!(
    /// Returned by [`TimerHost::set_interval`].
    TimerHandle
);

/// Receives `is_intersecting` for the observed region.
pub type IntersectionCallback = Box<dyn FnMut(bool)>;
/// Receives nothing; the handler re-measures what it needs.
pub type ListenerCallback = Box<dyn FnMut()>;
/// Receives the frame timestamp, measured from the host's clock origin.
pub type FrameCallback = Box<dyn FnOnce(Duration)>;
pub type TimerCallback = Box<dyn FnMut()>;

// =============================================================================
// HOST TRAITS
// =============================================================================

pub trait IntersectionHost {
    fn observe(
        &self,
        region: RegionId,
        options: IntersectionOptions,
        callback: IntersectionCallback,
    ) -> Result<ObserverHandle, HostError>;

    /// Unknown or already released handles are ignored.
    fn unobserve(&self, handle: ObserverHandle);
}

pub trait ScrollHost {
    fn add_listener(
        &self,
        event: ViewportEvent,
        callback: ListenerCallback,
    ) -> Result<ListenerHandle, HostError>;

    /// Unknown or already released handles are ignored.
    fn remove_listener(&self, handle: ListenerHandle);

    /// Move a horizontal scroll container.
    fn scroll_to(&self, region: RegionId, left: f64, behavior: ScrollBehavior);
}

pub trait GeometryHost {
    /// Viewport-relative box, or `None` if the region is not mounted.
    fn bounding_box(&self, region: RegionId) -> Option<Rect>;

    /// Horizontal scroll geometry, or `None` if the region is not mounted.
    fn scroll_extent(&self, region: RegionId) -> Option<ScrollExtent>;
}

pub trait FrameHost {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, HostError>;

    /// Cancelling a frame that already ran is a no-op.
    fn cancel_frame(&self, handle: FrameHandle);
}

pub trait TimerHost {
    fn set_interval(&self, period: Duration, callback: TimerCallback) -> Result<TimerHandle, HostError>;

    /// Unknown or already cleared handles are ignored.
    fn clear_interval(&self, handle: TimerHandle);
}

/// Everything a full page needs.
pub trait Host: IntersectionHost + ScrollHost + GeometryHost + FrameHost + TimerHost {}

impl<T> Host for T where T: IntersectionHost + ScrollHost + GeometryHost + FrameHost + TimerHost {}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Scoped registration with a host primitive.
///
/// Released exactly once: either explicitly via [`Subscription::release`] or
/// when dropped.
#[must_use = "dropping a Subscription releases its registration"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// Release the registration now.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

// =============================================================================
// SCOPED REGISTRATION HELPERS
// =============================================================================
//
// The release closures hold the host weakly: a host dropped before its
// subscribers has nothing left to unregister from.

/// Observe `region` and return a scoped subscription.
pub fn observe<H>(
    host: &Rc<H>,
    region: RegionId,
    options: IntersectionOptions,
    callback: impl FnMut(bool) + 'static,
) -> Result<Subscription, HostError>
where
    H: IntersectionHost + 'static,
{
    let handle = host.observe(region, options, Box::new(callback))?;
    let host = Rc::downgrade(host);
    Ok(Subscription::new(move || {
        if let Some(host) = host.upgrade() {
            host.unobserve(handle);
        }
    }))
}

/// Listen for a window event and return a scoped subscription.
pub fn listen<H>(
    host: &Rc<H>,
    event: ViewportEvent,
    callback: impl FnMut() + 'static,
) -> Result<Subscription, HostError>
where
    H: ScrollHost + 'static,
{
    let handle = host.add_listener(event, Box::new(callback))?;
    let host = Rc::downgrade(host);
    Ok(Subscription::new(move || {
        if let Some(host) = host.upgrade() {
            host.remove_listener(handle);
        }
    }))
}

/// Start a repeating timer and return a scoped subscription.
pub fn interval<H>(
    host: &Rc<H>,
    period: Duration,
    callback: impl FnMut() + 'static,
) -> Result<Subscription, HostError>
where
    H: TimerHost + 'static,
{
    let handle = host.set_interval(period, Box::new(callback))?;
    let host = Rc::downgrade(host);
    Ok(Subscription::new(move || {
        if let Some(host) = host.upgrade() {
            host.clear_interval(handle);
        }
    }))
}

/// Request one animation frame and return a subscription that cancels it.
pub fn frame<H>(
    host: &Rc<H>,
    callback: impl FnOnce(Duration) + 'static,
) -> Result<Subscription, HostError>
where
    H: FrameHost + 'static,
{
    let handle = host.request_frame(Box::new(callback))?;
    let host = Rc::downgrade(host);
    Ok(Subscription::new(move || {
        if let Some(host) = host.upgrade() {
            host.cancel_frame(handle);
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_subscription_releases_once() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let sub = Subscription::new(move || c.set(c.get() + 1));

        sub.release();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_subscription_releases_on_drop() {
        let count = Rc::new(Cell::new(0));
        {
            let c = count.clone();
            let _sub = Subscription::new(move || c.set(c.get() + 1));
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_listen_unregisters_on_release() {
        let host = Rc::new(SimHost::new(800.0, 600.0));
        let sub = listen(&host, ViewportEvent::Scroll, || {}).unwrap();
        assert_eq!(host.listener_count(), 1);

        sub.release();
        assert_eq!(host.listener_count(), 0);
    }

    #[test]
    fn test_release_after_host_dropped_is_noop() {
        let host = Rc::new(SimHost::new(800.0, 600.0));
        let sub = interval(&host, Duration::from_millis(10), || {}).unwrap();
        drop(host);
        sub.release();
    }

    #[test]
    fn test_missing_capability_reports_unavailable() {
        let host = Rc::new(SimHost::with_capabilities(
            Capabilities::all() - Capabilities::TIMER,
            800.0,
            600.0,
        ));
        let err = interval(&host, Duration::from_millis(10), || {}).unwrap_err();
        assert_eq!(err, HostError::Unavailable(Capabilities::TIMER));
    }
}
