//! Deterministic in-process host.
//!
//! Models a single window with a vertical document scroll, a set of
//! measurable regions, a manual clock driving intervals, and a manual
//! animation-frame pump. Nothing happens until the owner drives it, which
//! makes every turn of the event loop explicit in tests.
//!
//! No internal borrow is held while a callback runs: callbacks may freely
//! register, unregister, or request frames against the same host.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

use super::{
    Capabilities, FrameCallback, FrameHandle, FrameHost, GeometryHost, IntersectionCallback,
    IntersectionHost, ListenerCallback, ListenerHandle, ObserverHandle, ScrollHost, TimerCallback,
    TimerHandle, TimerHost,
};
use crate::error::HostError;
use crate::types::{IntersectionOptions, Rect, RegionId, ScrollBehavior, ScrollExtent, ViewportEvent};

// =============================================================================
// STATE
// =============================================================================

struct SimRegion {
    /// Document coordinates for scrolling regions, viewport coordinates for fixed ones.
    rect: Rect,
    fixed: bool,
    extent: Option<ScrollExtent>,
    scroll_left: f64,
}

struct SimObserver {
    region: RegionId,
    options: IntersectionOptions,
    callback: Option<IntersectionCallback>,
    last: Option<bool>,
}

struct SimListener {
    event: ViewportEvent,
    callback: Option<ListenerCallback>,
}

struct SimTimer {
    period: Duration,
    next_due: Duration,
    callback: Option<TimerCallback>,
}

/// Notifications queued for the next [`SimHost::flush`].
enum QueuedEvent {
    Intersection { region: RegionId, is_intersecting: bool },
    Viewport(ViewportEvent),
}

struct SimState {
    next_id: u64,
    viewport_width: f64,
    viewport_height: f64,
    scroll_y: f64,
    now: Duration,
    regions: HashMap<RegionId, SimRegion>,
    observers: BTreeMap<u64, SimObserver>,
    listeners: BTreeMap<u64, SimListener>,
    frames: BTreeMap<u64, FrameCallback>,
    timers: BTreeMap<u64, SimTimer>,
    queue: VecDeque<QueuedEvent>,
    scroll_log: Vec<(RegionId, f64, ScrollBehavior)>,
}

impl SimState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn viewport(&self) -> Rect {
        Rect::sized(self.viewport_width, self.viewport_height)
    }

    fn region_box(&self, region: RegionId) -> Option<Rect> {
        self.regions.get(&region).map(|r| {
            if r.fixed {
                r.rect
            } else {
                r.rect.offset_y(-self.scroll_y)
            }
        })
    }
}

// =============================================================================
// SIM HOST
// =============================================================================

pub struct SimHost {
    capabilities: Capabilities,
    state: RefCell<SimState>,
}

impl SimHost {
    /// Host with every capability and a viewport of the given size.
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self::with_capabilities(Capabilities::all(), viewport_width, viewport_height)
    }

    pub fn with_capabilities(capabilities: Capabilities, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            capabilities,
            state: RefCell::new(SimState {
                next_id: 0,
                viewport_width,
                viewport_height,
                scroll_y: 0.0,
                now: Duration::ZERO,
                regions: HashMap::new(),
                observers: BTreeMap::new(),
                listeners: BTreeMap::new(),
                frames: BTreeMap::new(),
                timers: BTreeMap::new(),
                queue: VecDeque::new(),
                scroll_log: Vec::new(),
            }),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn require(&self, capability: Capabilities) -> Result<(), HostError> {
        if self.capabilities.contains(capability) {
            Ok(())
        } else {
            Err(HostError::Unavailable(capability))
        }
    }

    // -------------------------------------------------------------------------
    // Page layout
    // -------------------------------------------------------------------------

    /// Add a region that scrolls with the document (`rect` in document coordinates).
    pub fn add_region(&self, region: RegionId, rect: Rect) {
        self.insert_region(region, rect, false);
    }

    /// Add a region pinned to the viewport (`rect` in viewport coordinates).
    pub fn add_fixed_region(&self, region: RegionId, rect: Rect) {
        self.insert_region(region, rect, true);
    }

    fn insert_region(&self, region: RegionId, rect: Rect, fixed: bool) {
        self.state.borrow_mut().regions.insert(
            region,
            SimRegion { rect, fixed, extent: None, scroll_left: 0.0 },
        );
    }

    /// Make a region horizontally scrollable.
    pub fn set_scroll_extent(&self, region: RegionId, extent: ScrollExtent) {
        if let Some(r) = self.state.borrow_mut().regions.get_mut(&region) {
            r.extent = Some(extent);
        }
    }

    pub fn remove_region(&self, region: RegionId) {
        self.state.borrow_mut().regions.remove(&region);
    }

    /// Current horizontal scroll position of a region.
    pub fn scroll_left(&self, region: RegionId) -> Option<f64> {
        self.state.borrow().regions.get(&region).map(|r| r.scroll_left)
    }

    /// Every `scroll_to` request received, oldest first.
    pub fn scroll_log(&self) -> Vec<(RegionId, f64, ScrollBehavior)> {
        self.state.borrow().scroll_log.clone()
    }

    pub fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    // -------------------------------------------------------------------------
    // Driving the event loop
    // -------------------------------------------------------------------------

    /// Scroll the document, then deliver intersection changes and scroll listeners.
    pub fn scroll_window_to(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y.max(0.0);
        self.refresh_intersections();
        self.dispatch(ViewportEvent::Scroll);
    }

    /// Resize the viewport, then deliver intersection changes and resize listeners.
    pub fn resize(&self, width: f64, height: f64) {
        {
            let mut state = self.state.borrow_mut();
            state.viewport_width = width;
            state.viewport_height = height;
        }
        self.refresh_intersections();
        self.dispatch(ViewportEvent::Resize);
    }

    /// Deliver an intersection change for `region` on the next [`flush`](Self::flush).
    pub fn queue_intersection(&self, region: RegionId, is_intersecting: bool) {
        self.state
            .borrow_mut()
            .queue
            .push_back(QueuedEvent::Intersection { region, is_intersecting });
    }

    /// Deliver a window event on the next [`flush`](Self::flush).
    pub fn queue_viewport_event(&self, event: ViewportEvent) {
        self.state.borrow_mut().queue.push_back(QueuedEvent::Viewport(event));
    }

    /// Deliver pending initial intersection notifications, then queued events in order.
    pub fn flush(&self) {
        self.refresh_intersections();
        loop {
            let next = self.state.borrow_mut().queue.pop_front();
            match next {
                Some(QueuedEvent::Intersection { region, is_intersecting }) => {
                    self.notify_intersection(region, is_intersecting);
                }
                Some(QueuedEvent::Viewport(event)) => self.dispatch(event),
                None => break,
            }
        }
    }

    /// Immediately deliver `is_intersecting` to every observer of `region`.
    pub fn notify_intersection(&self, region: RegionId, is_intersecting: bool) {
        let ids: Vec<u64> = self
            .state
            .borrow()
            .observers
            .iter()
            .filter(|(_, o)| o.region == region)
            .map(|(id, _)| *id)
            .collect();

        for id in ids {
            self.call_observer(id, is_intersecting);
        }
    }

    /// Run every frame callback requested so far with `timestamp`.
    ///
    /// Frames requested from inside a callback wait for the next call.
    /// Returns how many callbacks ran.
    pub fn advance_frame(&self, timestamp: Duration) -> usize {
        let last = {
            let mut state = self.state.borrow_mut();
            state.now = state.now.max(timestamp);
            match state.frames.keys().next_back() {
                Some(&id) => id,
                None => return 0,
            }
        };

        let mut count = 0;
        loop {
            // Re-read per frame: an earlier callback may have cancelled a later one.
            let next = {
                let mut state = self.state.borrow_mut();
                let id = state.frames.keys().next().copied().filter(|&id| id <= last);
                id.and_then(|id| state.frames.remove(&id))
            };
            let Some(callback) = next else { break };
            callback(timestamp);
            count += 1;
        }
        count
    }

    /// Move the clock forward by `elapsed`, firing due intervals in order.
    pub fn advance_time(&self, elapsed: Duration) {
        let target = self.state.borrow().now + elapsed;

        loop {
            let due = {
                let state = self.state.borrow();
                state
                    .timers
                    .iter()
                    .filter(|(_, t)| t.next_due <= target)
                    .min_by_key(|(id, t)| (t.next_due, **id))
                    .map(|(id, _)| *id)
            };
            let Some(id) = due else { break };

            let callback = {
                let mut state = self.state.borrow_mut();
                let Some(timer) = state.timers.get_mut(&id) else { continue };
                let fired_at = timer.next_due;
                timer.next_due += timer.period;
                let callback = timer.callback.take();
                state.now = fired_at;
                callback
            };

            if let Some(mut callback) = callback {
                callback();
                let leftover = {
                    let mut state = self.state.borrow_mut();
                    match state.timers.get_mut(&id) {
                        Some(timer) => {
                            timer.callback = Some(callback);
                            None
                        }
                        None => Some(callback),
                    }
                };
                drop(leftover);
            }
        }

        self.state.borrow_mut().now = target;
    }

    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    // -------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------

    pub fn observer_count(&self) -> usize {
        self.state.borrow().observers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn pending_frame_count(&self) -> usize {
        self.state.borrow().frames.len()
    }

    pub fn timer_count(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// True when nothing is registered with the host.
    pub fn is_idle(&self) -> bool {
        self.observer_count() == 0
            && self.listener_count() == 0
            && self.pending_frame_count() == 0
            && self.timer_count() == 0
    }

    // -------------------------------------------------------------------------
    // Dispatch internals
    // -------------------------------------------------------------------------

    /// Recompute intersection for every observer with geometry and notify on change.
    fn refresh_intersections(&self) {
        let changes: Vec<(u64, bool)> = {
            let state = self.state.borrow();
            let viewport = state.viewport();
            state
                .observers
                .iter()
                .filter_map(|(id, o)| {
                    let rect = state.region_box(o.region)?;
                    let now = o.options.is_intersecting(&rect, &viewport);
                    (o.last != Some(now)).then_some((*id, now))
                })
                .collect()
        };

        for (id, is_intersecting) in changes {
            self.call_observer(id, is_intersecting);
        }
    }

    fn call_observer(&self, id: u64, is_intersecting: bool) {
        let callback = {
            let mut state = self.state.borrow_mut();
            let Some(observer) = state.observers.get_mut(&id) else { return };
            observer.last = Some(is_intersecting);
            observer.callback.take()
        };

        if let Some(mut callback) = callback {
            callback(is_intersecting);
            let leftover = {
                let mut state = self.state.borrow_mut();
                match state.observers.get_mut(&id) {
                    Some(observer) => {
                        observer.callback = Some(callback);
                        None
                    }
                    None => Some(callback),
                }
            };
            drop(leftover);
        }
    }

    fn dispatch(&self, event: ViewportEvent) {
        let ids: Vec<u64> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|(_, l)| l.event == event)
            .map(|(id, _)| *id)
            .collect();

        for id in ids {
            let callback = self
                .state
                .borrow_mut()
                .listeners
                .get_mut(&id)
                .and_then(|l| l.callback.take());

            if let Some(mut callback) = callback {
                callback();
                let leftover = {
                    let mut state = self.state.borrow_mut();
                    match state.listeners.get_mut(&id) {
                        Some(listener) => {
                            listener.callback = Some(callback);
                            None
                        }
                        None => Some(callback),
                    }
                };
                drop(leftover);
            }
        }
    }
}

// =============================================================================
// TRAIT IMPLS
// =============================================================================

impl IntersectionHost for SimHost {
    fn observe(
        &self,
        region: RegionId,
        options: IntersectionOptions,
        callback: IntersectionCallback,
    ) -> Result<ObserverHandle, HostError> {
        self.require(Capabilities::INTERSECTION)?;
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.observers.insert(
            id,
            SimObserver { region, options, callback: Some(callback), last: None },
        );
        Ok(ObserverHandle(id))
    }

    fn unobserve(&self, handle: ObserverHandle) {
        let removed = self.state.borrow_mut().observers.remove(&handle.0);
        drop(removed);
    }
}

impl ScrollHost for SimHost {
    fn add_listener(
        &self,
        event: ViewportEvent,
        callback: ListenerCallback,
    ) -> Result<ListenerHandle, HostError> {
        self.require(Capabilities::SCROLL)?;
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.listeners.insert(id, SimListener { event, callback: Some(callback) });
        Ok(ListenerHandle(id))
    }

    fn remove_listener(&self, handle: ListenerHandle) {
        let removed = self.state.borrow_mut().listeners.remove(&handle.0);
        drop(removed);
    }

    fn scroll_to(&self, region: RegionId, left: f64, behavior: ScrollBehavior) {
        if !self.capabilities.contains(Capabilities::SCROLL) {
            return;
        }
        let mut state = self.state.borrow_mut();
        state.scroll_log.push((region, left, behavior));
        if let Some(r) = state.regions.get_mut(&region) {
            let max = r.extent.map(|e| e.max_offset()).unwrap_or(0.0);
            r.scroll_left = left.clamp(0.0, max);
        }
    }
}

impl GeometryHost for SimHost {
    fn bounding_box(&self, region: RegionId) -> Option<Rect> {
        if !self.capabilities.contains(Capabilities::GEOMETRY) {
            return None;
        }
        self.state.borrow().region_box(region)
    }

    fn scroll_extent(&self, region: RegionId) -> Option<ScrollExtent> {
        if !self.capabilities.contains(Capabilities::GEOMETRY) {
            return None;
        }
        self.state.borrow().regions.get(&region).and_then(|r| r.extent)
    }
}

impl FrameHost for SimHost {
    fn request_frame(&self, callback: FrameCallback) -> Result<FrameHandle, HostError> {
        self.require(Capabilities::ANIMATION_FRAME)?;
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.frames.insert(id, callback);
        Ok(FrameHandle(id))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let removed = self.state.borrow_mut().frames.remove(&handle.0);
        drop(removed);
    }
}

impl TimerHost for SimHost {
    fn set_interval(&self, period: Duration, callback: TimerCallback) -> Result<TimerHandle, HostError> {
        self.require(Capabilities::TIMER)?;
        if period.is_zero() {
            return Err(HostError::ZeroPeriod);
        }
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        let next_due = state.now + period;
        state.timers.insert(id, SimTimer { period, next_due, callback: Some(callback) });
        Ok(TimerHandle(id))
    }

    fn clear_interval(&self, handle: TimerHandle) {
        let removed = self.state.borrow_mut().timers.remove(&handle.0);
        drop(removed);
    }
}

// =============================================================================
// TESTS
// =============================================================================
