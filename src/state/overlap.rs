//! Header Overlap - Is the fixed header sitting over a band?
//!
//! Re-measures two regions on every scroll and resize and stores whether the
//! header's bottom edge lies strictly inside the target's vertical span.
//! Sampled once at mount so the first render is already correct.

use std::rc::{Rc, Weak};

use spark_signals::{signal, Signal};

use crate::host::{self, GeometryHost, ScrollHost, Subscription};
use crate::types::{Rect, RegionId, ViewportEvent};

/// `true` exactly while `header.bottom` is strictly inside `target`'s vertical span.
pub fn header_overlaps(header: &Rect, target: &Rect) -> bool {
    target.spans_y(header.bottom)
}

pub struct OverlapDetector {
    active: Signal<bool>,
    subscriptions: Vec<Subscription>,
}

impl OverlapDetector {
    pub fn mount<H>(host: &Rc<H>, header: RegionId, target: RegionId) -> Self
    where
        H: ScrollHost + GeometryHost + 'static,
    {
        let active = signal(false);
        let sample = sampler(Rc::downgrade(host), header, target, active.clone());

        sample();

        let mut subscriptions = Vec::with_capacity(2);
        for event in [ViewportEvent::Scroll, ViewportEvent::Resize] {
            let sample = sample.clone();
            match host::listen(host, event, move || sample()) {
                Ok(subscription) => subscriptions.push(subscription),
                Err(err) => {
                    tracing::debug!(?event, %err, "overlap detection limited to initial sample");
                }
            }
        }

        Self { active, subscriptions }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn signal(&self) -> Signal<bool> {
        self.active.clone()
    }

    /// Number of window listeners currently held.
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn unmount(mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.release();
        }
    }
}

/// Build the measurement closure shared by the eager sample and both listeners.
fn sampler<H>(host: Weak<H>, header: RegionId, band: RegionId, active: Signal<bool>) -> Rc<dyn Fn()>
where
    H: GeometryHost + 'static,
{
    Rc::new(move || {
        let Some(host) = host.upgrade() else { return };
        let overlapping = match (host.bounding_box(header), host.bounding_box(band)) {
            (Some(header_box), Some(target_box)) => header_overlaps(&header_box, &target_box),
            _ => false,
        };
        if active.get() != overlapping {
            tracing::trace!(%header, %band, overlapping, "header overlap changed");
            active.set(overlapping);
        }
    })
}
