//! Viewport Intersection - Live visibility of one region
//!
//! Wraps a single host intersection observer:
//! - `intersecting` signal (initially `false`)
//! - Updated only from the host callback
//! - Observer released on `unmount()` or drop
//!
//! If the host has no intersection primitive the signal simply stays at its
//! initial value.
//!
//! # Example
//!
//! ```ignore
//! use spark_landing::state::ViewportIntersectionTracker;
//!
//! let hero = ViewportIntersectionTracker::mount(&host, HERO, config.header.hero_options());
//! if hero.is_intersecting() { /* ... */ }
//! hero.unmount();
//! ```

use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::host::{self, IntersectionHost, Subscription};
use crate::types::{IntersectionOptions, RegionId};

/// Mirrors the host's intersection reports for one region into a signal.
pub struct ViewportIntersectionTracker {
    region: RegionId,
    /// Last reported state; `false` until the first report.
    intersecting: Signal<bool>,
    /// `None` when the host could not observe.
    subscription: Option<Subscription>,
}

impl ViewportIntersectionTracker {
    /// Start observing `region`.
    pub fn mount<H>(host: &Rc<H>, region: RegionId, options: IntersectionOptions) -> Self
    where
        H: IntersectionHost + 'static,
    {
        let intersecting = signal(false);
        let target = intersecting.clone();

        let subscription = match host::observe(host, region, options, move |is_intersecting| {
            tracing::trace!(%region, is_intersecting, "intersection changed");
            target.set(is_intersecting);
        }) {
            Ok(subscription) => Some(subscription),
            Err(err) => {
                tracing::debug!(%region, %err, "intersection tracking disabled");
                None
            }
        };

        Self { region, intersecting, subscription }
    }

    /// The observed region.
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Whether the region currently intersects the (margin-adjusted) viewport.
    pub fn is_intersecting(&self) -> bool {
        self.intersecting.get()
    }

    /// The underlying signal, for deriving other state from it.
    pub fn signal(&self) -> Signal<bool> {
        self.intersecting.clone()
    }

    /// Whether the host accepted the observer.
    pub fn is_observing(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stop observing. The signal keeps its last value.
    pub fn unmount(mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
    }
}
